use std::collections::HashMap;

use md5::{Digest, Md5};

/// Lifetime of the `dateToken` expiry stamp: 20 minutes in milliseconds.
/// Legacy constant from the upstream contract; treated as advisory.
pub const SIGNING_TTL_MS: i64 = 20 * 60 * 1000;

/// Parameter names eligible for inclusion in the signed query string.
/// Anything else handed to [`sign`] is silently dropped.
pub const ALLOWED_PARAMS: &[&str] = &[
    "filter",
    "fromDate",
    "granularity",
    "groupBy",
    "metrics",
    "streamingType",
    "timezone",
    "toDate",
    "type",
];

/// A fully assembled, authenticated upstream request.
///
/// The api key only influences `digest`; it never appears in `full_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub path: String,
    pub ordered_params: String,
    pub expiry_epoch_ms: i64,
    pub digest: String,
    pub full_url: String,
}

/// Build a signed request URL for the account's `/data` endpoint.
///
/// Pure in its inputs: the same `now_ms` always yields the same URL. The
/// canonical parameter order is lexicographic by name (byte order),
/// recomputed here regardless of the iteration order of `params`.
///
/// The digest is MD5 over `path?dateToken=<expiry><fragment><api_key>`,
/// hex-encoded. MD5 is a legacy tamper check the remote service expects
/// bit-for-bit; it is not a security boundary and must not be replaced
/// with a stronger hash without breaking interoperability.
pub fn sign(
    service_root: &str,
    account: &str,
    api_key: &str,
    params: &HashMap<String, String>,
    now_ms: i64,
    ttl_ms: i64,
) -> SignedRequest {
    let expiry_epoch_ms = now_ms + ttl_ms;
    let path = format!("/{}/data", account);

    let mut keys: Vec<&str> = params
        .keys()
        .map(String::as_str)
        .filter(|k| ALLOWED_PARAMS.contains(k))
        .collect();
    keys.sort_unstable();

    let mut fragment = String::new();
    for key in keys {
        fragment.push('&');
        fragment.push_str(key);
        fragment.push('=');
        fragment.push_str(&urlencoding::encode(&params[key]));
    }

    let ordered_params = format!("dateToken={}{}", expiry_epoch_ms, fragment);

    let mut hasher = Md5::new();
    hasher.update(path.as_bytes());
    hasher.update(b"?");
    hasher.update(ordered_params.as_bytes());
    hasher.update(api_key.as_bytes());
    let digest = hex::encode(hasher.finalize());

    let full_url = format!(
        "{}/youbora{}?{}&token={}",
        service_root.trim_end_matches('/'),
        path,
        ordered_params,
        digest
    );

    SignedRequest {
        path,
        ordered_params,
        expiry_epoch_ms,
        digest,
        full_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_params() -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("type".to_string(), "ALL".to_string());
        params.insert("metrics".to_string(), "views".to_string());
        params.insert("timezone".to_string(), "GMT".to_string());
        params.insert("granularity".to_string(), "minute".to_string());
        params.insert("fromDate".to_string(), "1646220720".to_string());
        params.insert("dropped".to_string(), "yes".to_string());
        params.insert("zz_unknown".to_string(), "1".to_string());
        params
    }

    #[test]
    fn test_params_sorted_lexicographically() {
        let signed = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert_eq!(
            signed.ordered_params,
            "dateToken=1646221200000&fromDate=1646220720&granularity=minute\
             &metrics=views&timezone=GMT&type=ALL"
        );
    }

    #[test]
    fn test_unknown_params_never_signed() {
        let signed = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert!(!signed.full_url.contains("dropped"));
        assert!(!signed.full_url.contains("zz_unknown"));
    }

    #[test]
    fn test_deterministic_for_fixed_now() {
        let a = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );
        let b = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert_eq!(a, b);
    }

    #[test]
    fn test_known_digest_vector() {
        // MD5("/mytestaccount/data?dateToken=1646221200000&fromDate=1646220720
        //      &granularity=minute&metrics=views&timezone=GMT&type=ALLmytestapikey")
        let signed = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert_eq!(signed.digest, "99fecf4fae08880878bd286decefad53");
        assert_eq!(
            signed.full_url,
            "https://api.youbora.com/youbora/mytestaccount/data\
             ?dateToken=1646221200000&fromDate=1646220720&granularity=minute\
             &metrics=views&timezone=GMT&type=ALL\
             &token=99fecf4fae08880878bd286decefad53"
        );
    }

    #[test]
    fn test_api_key_changes_digest_only() {
        let a = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );
        let b = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikeX",
            &simple_params(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert_ne!(a.digest, b.digest);
        assert_eq!(a.ordered_params, b.ordered_params);
        assert!(!a.full_url.contains("mytestapikey"));
    }

    #[test]
    fn test_empty_credentials_still_sign() {
        let signed = sign(
            "https://api.youbora.com",
            "",
            "",
            &HashMap::new(),
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert_eq!(signed.path, "//data");
        assert_eq!(signed.digest.len(), 32);
        assert!(signed.full_url.starts_with("https://api.youbora.com/youbora//data?dateToken="));
    }

    #[test]
    fn test_param_values_percent_encoded() {
        let mut params = HashMap::new();
        params.insert(
            "filter".to_string(),
            r#"[{"name":"country=Brazil","rules":{"country":["Brazil"]}}]"#.to_string(),
        );
        let signed = sign(
            "https://api.youbora.com",
            "mytestaccount",
            "mytestapikey",
            &params,
            1_646_220_000_000,
            SIGNING_TTL_MS,
        );

        assert!(signed.ordered_params.contains(
            "filter=%5B%7B%22name%22%3A%22country%3DBrazil%22%2C%22rules%22%3A%7B%22country%22%3A%5B%22Brazil%22%5D%7D%7D%5D"
        ));
    }
}
