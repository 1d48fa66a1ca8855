/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}

#[cfg(test)]
mod test_group_digits {
    use super::*;
    use rstest::rstest;

    #[rstest(/**/   n    , expected   ,
             case(      7, "7"        ),
             case(   1234, "1,234"    ),
             case(1234567, "1,234,567"),
    )]
    fn thousands(n: u64, expected: &str) {
        assert_eq!(group_digits(n), expected);
    }
}
