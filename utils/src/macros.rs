/// Creates a `String` from a literal or expression.
#[macro_export]
macro_rules! string {
    ($str:expr) => {
        ::std::string::String::from($str)
    };
}

/// Creates a `Vec<String>` from a list of literals or expressions.
///
/// # Examples
/// ```
/// use siteforge_utils::string_vec;
///
/// let args = string_vec!["server", "--watch", format!("--bind={}", "0.0.0.0")];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! string_vec {
    ($($string:expr),* $(,)?) => {
        vec![$($crate::string!($string),)*]
    };
}

/// Creates or modifies a `std::process::Command`, adding args.
///
/// # Examples
/// ```
/// use siteforge_utils::cmd;
///
/// let mut command = cmd!("echo", "Hello world!");
/// cmd!(command, "more", format!("args={}", 42));
/// command.status().unwrap();
/// ```
#[macro_export]
macro_rules! cmd {
    ($command:literal) => {
        {
            ::std::process::Command::new($command)
        }
    };
    ($command:literal, $($arg:expr),+ $(,)?) => {
        {
            let mut c = $crate::cmd!($command);
            c$(.arg($arg))+;
            c
        }
    };
    ($command:ident, $($arg:expr),+ $(,)?) => {
        {
            $command$(.arg($arg))+;
        }
    };
}
