use url::Url;

/// Return `true` if `candidate` is an absolute `http`/`https` URL with a host.
///
/// Whitespace and ASCII control characters are refused outright: the parser
/// would percent-encode them in its own copy, but the raw string is what gets
/// stored and later sent back in `Location`.
///
/// This is the gate in front of [`LinkStore::shorten`](crate::store::LinkStore::shorten):
/// anything rejected here never reaches the store.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty()
        || candidate.chars().any(char::is_whitespace)
        || candidate.bytes().any(|b| b.is_ascii_control())
    {
        return false;
    }

    match Url::parse(candidate) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
