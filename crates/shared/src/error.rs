use crate::MonthKey;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a dish named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("invalid category \"{0}\", expected one of Protein, Vegetables, Mixed")]
    InvalidCategory(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{dish} is already planned on day {day} of {month}")]
    DuplicateDayAssignment {
        month: MonthKey,
        day: u8,
        dish: String,
    },

    #[error("{dish} is already planned in the same week as day {day} of {month}")]
    DuplicateWeekAssignment {
        month: MonthKey,
        day: u8,
        dish: String,
    },

    #[error("invalid document: {0}")]
    Schema(String),

    #[error("no ingredients found in planned meals")]
    NoData,

    #[error("dish \"{0}\" not found")]
    UnknownDish(String),

    #[error("day {day} does not exist in {month}")]
    InvalidDay { month: MonthKey, day: u8 },

    #[error("invalid month \"{0}\", expected YYYY-MM")]
    InvalidMonth(String),

    #[error("no dish at position {0}")]
    IndexOutOfRange(usize),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<time::error::Format> for Error {
    fn from(value: time::error::Format) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Unknown($crate::__private::anyhow!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::from($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Unknown($crate::__private::anyhow!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! schema {
    ($($arg:tt)*) => {
        return Err($crate::Error::Schema(format!($($arg)*)))
    };
}
