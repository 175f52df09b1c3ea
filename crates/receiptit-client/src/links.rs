//! # Verification and QR Links
//!
//! Builders for the public verification URL and the QR image URL that
//! prints on the receipt. The QR renderer is a pure rendering
//! dependency: it receives the verification URL and returns a bitmap,
//! nothing more.

use receiptit_core::VerificationHash;
use url::Url;

/// External QR image renderer endpoint.
pub const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Pixel size requested for the QR bitmap.
const QR_SIZE: &str = "200x200";

/// The pair of public links produced at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLinks {
    /// `{origin}/verify?hash={hex}` — what a human or QR scan opens.
    pub verification_url: Url,
    /// QR renderer URL encoding the verification URL.
    pub qr_url: Url,
}

/// Build the public verification URL for a hash.
pub fn verification_url(origin: &Url, hash: &VerificationHash) -> Url {
    let mut url = origin.clone();
    url.set_path("/verify");
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair("hash", &hash.to_hex());
    url
}

/// Build the QR image URL for a verification URL.
pub fn qr_image_url(target: &Url) -> Result<Url, url::ParseError> {
    Url::parse_with_params(QR_ENDPOINT, &[("size", QR_SIZE), ("data", target.as_str())])
}

/// Build both links for a freshly registered hash.
pub fn build_links(origin: &Url, hash: &VerificationHash) -> Result<VerificationLinks, url::ParseError> {
    let verification_url = verification_url(origin, hash);
    let qr_url = qr_image_url(&verification_url)?;
    Ok(VerificationLinks {
        verification_url,
        qr_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://receiptit.example").unwrap()
    }

    fn hash() -> VerificationHash {
        VerificationHash::from_bytes([0xab; 32])
    }

    #[test]
    fn verification_url_format() {
        let url = verification_url(&origin(), &hash());
        assert_eq!(
            url.as_str(),
            format!("https://receiptit.example/verify?hash={}", "ab".repeat(32))
        );
    }

    #[test]
    fn verification_url_replaces_existing_path_and_query() {
        let noisy = Url::parse("https://receiptit.example/app?tab=receipts#top").unwrap();
        let url = verification_url(&noisy, &hash());
        assert_eq!(url.path(), "/verify");
        assert_eq!(url.query(), Some(format!("hash={}", "ab".repeat(32)).as_str()));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn qr_url_percent_encodes_target() {
        let links = build_links(&origin(), &hash()).unwrap();
        assert!(links.qr_url.as_str().starts_with(QR_ENDPOINT));
        // The embedded verification URL must be percent-encoded.
        assert!(links.qr_url.as_str().contains("data=https%3A%2F%2F"));
        assert!(links.qr_url.as_str().contains(&"ab".repeat(32)));
    }
}
