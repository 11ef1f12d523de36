//! Status reason catalog: the mapping from status code to reason phrase.

/// Fallback reason phrase for any status code outside the documented ranges.
pub const UNKNOWN_REASON: &str = "Unknown";

/// Returns the canonical reason phrase for a status code.
///
/// Total over all inputs: every enumerated code in the 100-511 ranges maps
/// to its standard IANA/RFC phrase, anything else maps to [`UNKNOWN_REASON`].
///
/// Helpful links:
/// <https://developer.mozilla.org/en-US/docs/Web/HTTP/Status>
/// <https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml>
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        103 => "Early Hints",

        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",

        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        306 => "Switch Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",

        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Content",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",

        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",

        _ => UNKNOWN_REASON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_codes() {
        assert_eq!(reason_phrase(200), "OK");
        assert_eq!(reason_phrase(204), "No Content");
        assert_eq!(reason_phrase(301), "Moved Permanently");
        assert_eq!(reason_phrase(404), "Not Found");
        assert_eq!(reason_phrase(500), "Internal Server Error");
    }

    #[test]
    fn test_modern_phrases() {
        assert_eq!(reason_phrase(422), "Unprocessable Content");
        assert_eq!(reason_phrase(425), "Too Early");
        assert_eq!(reason_phrase(429), "Too Many Requests");
        assert_eq!(reason_phrase(451), "Unavailable For Legal Reasons");
        assert_eq!(reason_phrase(511), "Network Authentication Required");
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(reason_phrase(100), "Continue");
        assert_eq!(reason_phrase(511), "Network Authentication Required");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(reason_phrase(0), UNKNOWN_REASON);
        assert_eq!(reason_phrase(99), UNKNOWN_REASON);
        // holes inside the enumerated ranges fall back too
        assert_eq!(reason_phrase(227), UNKNOWN_REASON);
        assert_eq!(reason_phrase(420), UNKNOWN_REASON);
        assert_eq!(reason_phrase(509), UNKNOWN_REASON);
        assert_eq!(reason_phrase(512), UNKNOWN_REASON);
        assert_eq!(reason_phrase(999), UNKNOWN_REASON);
    }
}
