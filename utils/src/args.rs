//! Assembly of command-line argument lists from heterogeneous
//! pieces: single tokens, grouped tokens, and optional arguments
//! that may not be present for a given invocation.

/// One piece of a command invocation.
///
/// A `Group` keeps tokens that belong together (a flag and its
/// value) ordered relative to their neighbors. `None` is the
/// collapsed form of an optional argument that wasn't set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Token(String),
    Group(Vec<String>),
    None,
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Token(value.into())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Token(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Token(value.clone())
    }
}

impl From<Vec<String>> for Arg {
    fn from(value: Vec<String>) -> Self {
        Self::Group(value)
    }
}

impl From<&[String]> for Arg {
    fn from(value: &[String]) -> Self {
        Self::Group(value.to_vec())
    }
}

impl<T> From<Option<T>> for Arg
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Flattens args into a single ordered list, dropping empty
/// tokens so optional arguments can collapse to nothing.
pub fn collapse_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = Arg>,
{
    args.into_iter()
        .flat_map(|arg| match arg {
            Arg::Token(token) => vec![token],
            Arg::Group(tokens) => tokens,
            Arg::None => Vec::new(),
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Collapses a mixed list of tokens, token groups, and optional
/// arguments into a flat `Vec<String>`.
///
/// # Examples
/// ```
/// use siteforge_utils::{collapse_args, string_vec};
///
/// let detach = true;
/// let name: Option<String> = None;
/// let args = collapse_args![
///     "run",
///     detach.then(|| String::from("-d")),
///     name.map(|n| format!("--name={n}")),
///     string_vec!["--rm", "-v", "/tmp:/src"],
/// ];
/// assert_eq!(args, string_vec!["run", "-d", "--rm", "-v", "/tmp:/src"]);
/// ```
#[macro_export]
macro_rules! collapse_args {
    ($($arg:expr),* $(,)?) => {
        $crate::args::collapse_args([$($crate::args::Arg::from($arg),)*])
    };
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{collapse_args, Arg};

    use crate::string_vec;

    #[rstest]
    #[case(
        vec![Arg::from("run"), Arg::from(string_vec!["-v", "/a:/b"]), Arg::from("image")],
        string_vec!["run", "-v", "/a:/b", "image"]
    )]
    #[case(
        vec![Arg::from(string_vec!["a", "b"]), Arg::from("c"), Arg::from(string_vec!["d"])],
        string_vec!["a", "b", "c", "d"]
    )]
    fn flattens_preserving_order(#[case] args: Vec<Arg>, #[case] expected: Vec<String>) {
        assert_eq!(collapse_args(args), expected);
    }

    #[rstest]
    #[case(vec![Arg::from(""), Arg::from("a"), Arg::from(string_vec!["", "b", ""])])]
    #[case(vec![Arg::from("a"), Arg::None, Arg::from("b")])]
    fn drops_empty_tokens(#[case] args: Vec<Arg>) {
        let collapsed = collapse_args(args);

        assert!(collapsed.iter().all(|token| !token.is_empty()));
    }

    #[test]
    fn optional_args_collapse() {
        let mount: Option<String> = None;
        let port = Some(String::from("-p"));

        let args = collapse_args![mount, port, "image"];

        assert_eq!(args, string_vec!["-p", "image"]);
    }
}
