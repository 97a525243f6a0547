use crate::Error;
use percent_encoding::percent_decode_str;

pub(crate) fn percent_decode_request_path(val: &str) -> Result<String, Error> {
    percent_decode_str(val)
        .decode_utf8()
        .map(|val| val.into_owned())
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::percent_decode_request_path;

    #[test]
    fn should_decode_path() {
        assert_eq!(percent_decode_request_path("/users/j%C3%BCrgen").unwrap(), "/users/jürgen");
        assert_eq!(percent_decode_request_path("/a%2Fb").unwrap(), "/a/b");
        assert!(percent_decode_request_path("/bad/%FF").is_err());
    }
}
