//! Assertion utilities for testing

/// Assert that two byte arrays are equal
#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {
        assert_eq!(
            String::from_utf8_lossy($left.as_ref()),
            String::from_utf8_lossy($right.as_ref())
        );
    };
}

/// Assert that a result is OK and unwrap it
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?} ({})", err, format!($($arg)+)),
        }
    };
}

/// Assert that a result is Err and unwrap the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(err) => err,
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?} ({})", val, format!($($arg)+)),
            Err(err) => err,
        }
    };
}

/// Assert that a result is Err carrying the given stable error code, and
/// unwrap the error
#[macro_export]
macro_rules! assert_err_code {
    ($expr:expr, $code:expr) => {{
        let err = $crate::assert_err!($expr);
        assert_eq!(
            $crate::__private::ErrorCode::code(&err),
            $code,
            "unexpected error: {}",
            err
        );
        err
    }};
}
