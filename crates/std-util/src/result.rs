/// Unwraps an `Err`, panicking with the `Ok` value otherwise. Extra arguments
/// are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(err) => err,
            Ok(value) => {
                #[allow(unused_mut)]
                let mut msg = format!(
                    "expected `Err` from `{}`; got Ok({:?})",
                    stringify!($e),
                    value
                );
                $(
                    msg.push_str(", ");
                    msg.push_str(&format!($($t)*));
                )?
                panic!("{}", msg);
            }
        }
    };
}

/// Unwraps an `Ok`, panicking with the error otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("expected `Ok` from `{}`; got Err({:?})", stringify!($e), err),
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn unwraps_the_expected_side() {
        let ok: Result<u8, &str> = Ok(1);
        let err: Result<u8, &str> = Err("boom");
        assert_eq!(assert_ok!(ok), 1);
        assert_eq!(assert_err!(err), "boom");
    }

    #[test]
    #[should_panic(expected = "expected `Err`")]
    fn ok_is_not_err() {
        let ok: Result<u8, &str> = Ok(1);
        assert_err!(ok, "while checking {}", "ok");
    }
}
