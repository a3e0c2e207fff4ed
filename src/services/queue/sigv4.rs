//! AWS Signature Version 4 for single-shot JSON POSTs.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Headers to attach to a signed request, besides `host`, which the HTTP client sets.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub headers: Vec<(&'static str, String)>,
    pub authorization: String,
}

pub struct RequestToSign<'a> {
    pub host: &'a str,
    /// Already percent-encoded path, as `reqwest::Url::path` returns it.
    pub path: &'a str,
    pub region: &'a str,
    pub service: &'a str,
    pub content_type: &'a str,
    pub target: &'a str,
    pub body: &'a [u8],
}

pub fn sign(
    req: &RequestToSign<'_>,
    creds: &Credentials,
    now: DateTime<Utc>,
) -> anyhow::Result<SignedHeaders> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();

    // Canonical headers must be lowercase and sorted by name.
    let mut canonical: Vec<(&'static str, String)> = vec![
        ("content-type", req.content_type.to_string()),
        ("host", req.host.to_string()),
        ("x-amz-date", amz_date.clone()),
    ];
    if let Some(token) = &creds.session_token {
        canonical.push(("x-amz-security-token", token.clone()));
    }
    canonical.push(("x-amz-target", req.target.to_string()));

    let canonical_headers: String = canonical
        .iter()
        .map(|(k, v)| format!("{k}:{}\n", v.trim()))
        .collect();
    let signed_headers = canonical
        .iter()
        .map(|(k, _)| *k)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n{}\n\n{canonical_headers}\n{signed_headers}\n{}",
        if req.path.is_empty() { "/" } else { req.path },
        sha256_hex(req.body)
    );

    let scope = format!("{date_stamp}/{}/{}/aws4_request", req.region, req.service);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let key = signing_key(&creds.secret_access_key, &date_stamp, req.region, req.service)?;
    let signature = hex(&hmac_sha256(&key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        creds.access_key_id
    );

    let headers = canonical
        .into_iter()
        .filter(|(k, _)| *k != "host")
        .collect();

    Ok(SignedHeaders {
        headers,
        authorization,
    })
}

pub fn signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> anyhow::Result<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| anyhow::anyhow!("invalid signing key: {e}"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
