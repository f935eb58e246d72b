// standard library
use std::io;

/// The lifecycle phase an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Setup,
    Write,
    Durability,
    Rename,
    Cleanup,
    AlreadyFinalized,
    Internal,
}

impl Code {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Setup => "setup",
            Self::Write => "write",
            Self::Durability => "durability",
            Self::Rename => "rename",
            Self::Cleanup => "cleanup",
            Self::AlreadyFinalized => "already_finalized",
            Self::Internal => "internal",
        }
    }
}

pub trait Error: std::error::Error {
    fn code(&self) -> Code {
        Code::Internal
    }
    /// The kind of the underlying filesystem error, if there is one.
    fn io_kind(&self) -> Option<io::ErrorKind> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Trace {
    pub file: &'static str,
    pub line: u32,
}

#[macro_export]
macro_rules! trace {
    () => {
        Box::new($crate::errors::Trace {
            file: file!(),
            line: line!(),
        })
    };
}

#[macro_export]
macro_rules! impl_error {
    ($enum_name:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::errors::Error for $enum_name {
            fn code(&self) -> $crate::errors::Code {
                match self {
                    $(Self::$variant(e) => e.code(),)+
                }
            }
            fn io_kind(&self) -> Option<std::io::ErrorKind> {
                match self {
                    $(Self::$variant(e) => e.io_kind(),)+
                }
            }
        }
    };
}

#[macro_export]
macro_rules! deserialize_warn {
    ($struct_name:expr, $field_name:expr, $default:expr) => {{
        ::tracing::warn!(
            "'{}' missing from struct '{}', setting to default: '{:?}'",
            $field_name,
            $struct_name,
            $default
        );
        $default
    }};
}
