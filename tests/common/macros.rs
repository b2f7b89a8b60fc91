/// Unwraps an `Ok`, panicking with the error otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("expected Ok(_), got Err({:?})", err),
        }
    };
}

/// Unwraps an `Err`. With a pattern, also checks which error it is.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("expected Err(_), got Ok({:?})", val),
            Err(err) => err,
        }
    };
    ($expr:expr, $pattern:pat) => {
        match $expr {
            Err($pattern) => {}
            other => panic!("expected Err({}), got {:?}", stringify!($pattern), other),
        }
    };
}
