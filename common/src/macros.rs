/// Prints a diagnostic line to stderr, but only if the given options ask for it. Stdout belongs
/// to the result.
#[macro_export]
macro_rules! verbose {
    ($opts:expr, $($arg:tt)*) => {
        if $opts.verbose {
            eprintln!($($arg)*);
        }
    };
}
