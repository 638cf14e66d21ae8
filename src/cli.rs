use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::iter;

/// Number of values an invocation must carry after the program name.
pub const ARG_COUNT: usize = 3;

/// Positional inputs of one upload. Help and version flags are disabled:
/// anything other than exactly three values is a usage error.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "image_upload", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Image file to upload
    pub image_path: String,

    /// Session token, sent as `X-Token`
    pub token: String,

    /// Identifier of the destination folder
    pub parent_id: String,
}

impl Args {
    /// Parse a raw argument list, program name first. The count is checked
    /// on the raw list, and every value is taken literally, so tokens
    /// starting with `-` and a bare `--` are plain values.
    pub fn from_raw<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut raw = raw.into_iter().map(Into::into);
        let bin = raw.next().unwrap_or_else(|| OsString::from("image_upload"));
        let values: Vec<OsString> = raw.collect();
        if values.len() != ARG_COUNT {
            return Err(Args::command().error(
                ErrorKind::WrongNumberOfValues,
                format!("expected {} arguments, got {}", ARG_COUNT, values.len()),
            ));
        }

        // after the escape clap stops looking for flags, even a second `--`
        let escaped = iter::once(bin)
            .chain(iter::once(OsString::from("--")))
            .chain(values);
        Args::try_parse_from(escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(image_path: &str, token: &str, parent_id: &str) -> Args {
        Args { image_path: image_path.into(), token: token.into(), parent_id: parent_id.into() }
    }

    #[test]
    fn three_positionals_parse() {
        let parsed = Args::from_raw(["image_upload", "cat.png", "tok", "p1"]).unwrap();
        assert_eq!(parsed, args("cat.png", "tok", "p1"));
    }

    #[test]
    fn wrong_count_is_rejected() {
        assert!(Args::from_raw(Vec::<String>::new()).is_err());
        assert!(Args::from_raw(["image_upload"]).is_err());
        assert!(Args::from_raw(["image_upload", "cat.png", "tok"]).is_err());
        assert!(Args::from_raw(["image_upload", "cat.png", "tok", "p1", "extra"]).is_err());
    }

    #[test]
    fn double_dash_counts_as_an_argument() {
        let err = Args::from_raw(["image_upload", "cat.png", "--", "tok", "p1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongNumberOfValues);
    }

    #[test]
    fn double_dash_is_a_literal_value() {
        let parsed = Args::from_raw(["image_upload", "--", "tok", "p1"]).unwrap();
        assert_eq!(parsed, args("--", "tok", "p1"));

        let parsed = Args::from_raw(["image_upload", "cat.png", "--", "p1"]).unwrap();
        assert_eq!(parsed, args("cat.png", "--", "p1"));
    }

    #[test]
    fn help_flag_is_not_special() {
        assert!(Args::from_raw(["image_upload", "--help"]).is_err());
        let parsed = Args::from_raw(["image_upload", "--help", "tok", "p1"]).unwrap();
        assert_eq!(parsed.image_path, "--help");
    }

    #[test]
    fn hyphen_leading_token_is_a_value() {
        let parsed = Args::from_raw(["image_upload", "cat.png", "-x9", "p1"]).unwrap();
        assert_eq!(parsed.token, "-x9");
    }
}
