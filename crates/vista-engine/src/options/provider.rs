use std::cell::RefCell;
use std::fmt;

/// Type of an option value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OptionKind {
    Bool,
    Int,
    Double,
    String,
    DoubleVector,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Bool => "bool",
            OptionKind::Int => "int",
            OptionKind::Double => "double",
            OptionKind::String => "string",
            OptionKind::DoubleVector => "double vector",
        };
        f.write_str(name)
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    DoubleVector(Vec<f64>),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Int(_) => OptionKind::Int,
            OptionValue::Double(_) => OptionKind::Double,
            OptionValue::String(_) => OptionKind::String,
            OptionValue::DoubleVector(_) => OptionKind::DoubleVector,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Double(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl From<Vec<f64>> for OptionValue {
    fn from(v: Vec<f64>) -> Self {
        OptionValue::DoubleVector(v)
    }
}

impl<const N: usize> From<[f64; N]> for OptionValue {
    fn from(v: [f64; N]) -> Self {
        OptionValue::DoubleVector(v.to_vec())
    }
}

/// Errors reported by an options provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
    #[error("option {0} does not exist")]
    Inexistent(String),

    #[error("option {key} is not a {expected}")]
    Incompatible { key: String, expected: OptionKind },
}

/// Read-only, typed access to the option snapshot.
///
/// A missing or mistyped key is reported as an [`OptionError`].
pub trait OptionsProvider {
    fn get_as_bool(&self, key: &str) -> Result<bool, OptionError>;
    fn get_as_int(&self, key: &str) -> Result<i32, OptionError>;
    fn get_as_double(&self, key: &str) -> Result<f64, OptionError>;
    fn get_as_string(&self, key: &str) -> Result<String, OptionError>;
    fn get_as_double_vector(&self, key: &str) -> Result<Vec<f64>, OptionError>;
}

/// Lets an application keep mutating its options while a window reads them.
impl<T: OptionsProvider + ?Sized> OptionsProvider for RefCell<T> {
    fn get_as_bool(&self, key: &str) -> Result<bool, OptionError> {
        self.borrow().get_as_bool(key)
    }

    fn get_as_int(&self, key: &str) -> Result<i32, OptionError> {
        self.borrow().get_as_int(key)
    }

    fn get_as_double(&self, key: &str) -> Result<f64, OptionError> {
        self.borrow().get_as_double(key)
    }

    fn get_as_string(&self, key: &str) -> Result<String, OptionError> {
        self.borrow().get_as_string(key)
    }

    fn get_as_double_vector(&self, key: &str) -> Result<Vec<f64>, OptionError> {
        self.borrow().get_as_double_vector(key)
    }
}
