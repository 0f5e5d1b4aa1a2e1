//! Share links: a cart encoded as a comma-separated id list in a URL.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;
use url::Url;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Path of the shared-cart page, relative to the storefront origin.
pub const SHARE_PATH: &str = "/cart/share";

/// Query parameter carrying the token.
pub const SHARE_PARAM: &str = "ids";

/// A cart's product ids, comma-joined (e.g. `"1,2,3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    /// Encode the ids of `cart` in cart order.
    pub fn encode(cart: &Cart) -> Self {
        let ids: Vec<String> = cart.iter().map(|p| p.id.to_string()).collect();
        Self(ids.join(","))
    }

    /// Wrap a raw token, as received from a link.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids carried by the token.
    ///
    /// Each segment is read like a lenient integer parse: leading whitespace
    /// and an optional sign, then as many digits as are present. Segments
    /// with no digits, and segments reading as 0, are dropped.
    pub fn ids(&self) -> Vec<ProductId> {
        self.0
            .split(',')
            .filter_map(|segment| match parse_leading_int(segment) {
                Some(id) if id != 0 => Some(ProductId::new(id)),
                _ => {
                    debug!(segment, "ignoring share token segment");
                    None
                }
            })
            .collect()
    }

    /// Decode `token` against the loaded `catalog`.
    ///
    /// `None` (no change to the cart) when the token is absent or empty.
    /// Otherwise the catalog products whose ids appear in the token, in
    /// catalog order; ids not in the catalog are ignored.
    pub fn decode(token: Option<&str>, catalog: &[Product]) -> Option<Vec<Product>> {
        let token = ShareToken::new(token.filter(|t| !t.is_empty())?);
        let wanted: HashSet<ProductId> = token.ids().into_iter().collect();
        Some(
            catalog
                .iter()
                .filter(|p| wanted.contains(&p.id))
                .cloned()
                .collect(),
        )
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest `[+-]?[0-9]+` prefix after leading whitespace, as an integer.
fn parse_leading_int(segment: &str) -> Option<i64> {
    let s = segment.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Building and reading shareable cart URLs.
pub struct ShareLink;

impl ShareLink {
    /// `{origin}/cart/share?ids=1,2,3` for `cart`.
    ///
    /// A path on `origin` is kept: `https://shop.example/catalog` shares
    /// under `/catalog/cart/share`.
    pub fn build(origin: &str, cart: &Cart) -> Result<Url, CatalogError> {
        let mut base = Url::parse(origin)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base.join(SHARE_PATH.trim_start_matches('/'))?;
        url.set_query(Some(&format!("{}={}", SHARE_PARAM, ShareToken::encode(cart))));
        Ok(url)
    }

    /// Extract the token from a share link, or accept `input` as a bare token.
    ///
    /// Absolute links and path-only links (`/cart/share?ids=1,2`) are both
    /// read through their `ids` parameter; a link without one yields `None`.
    /// Anything without a path or query is taken as the token itself.
    pub fn parse(input: &str) -> Option<ShareToken> {
        let input = input.trim();
        let url = match Url::parse(input) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) if is_link(input) => {
                Url::parse(PLACEHOLDER_BASE).ok()?.join(input).ok()?
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => return Some(ShareToken::new(input)),
            Err(e) => {
                debug!(error = %e, "unreadable share link");
                return None;
            }
        };

        url.query_pairs()
            .find(|(key, _)| key == SHARE_PARAM)
            .map(|(_, value)| ShareToken::new(value.into_owned()))
    }
}

/// Base for resolving path-only links; only the query is read afterwards.
const PLACEHOLDER_BASE: &str = "http://localhost/";

fn is_link(input: &str) -> bool {
    input.starts_with('/') || input.contains('?') || input.contains('=')
}
