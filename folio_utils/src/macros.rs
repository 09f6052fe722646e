/// Asserts that an expression matches a pattern and prints the value if it
/// does not.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(,)?) => {
        match $expr {
            $pat => {}
            ref val => ::core::panic!(
                "{val:?} does not match {}",
                ::core::stringify!($pat)
            ),
        }
    };
}
