//! Static source table and response parsing.
//!
//! Each source is pure data: where to send the request, what shape the request
//! takes, where the number lives in the response, and how to scale it to gwei.
//! Adding or removing an endpoint is an edit to [`PRIMARY_SOURCES`], never to
//! the acquisition loop.

use serde::Serialize;
use serde_json::{json, Value};

use super::provider::{SourceError, Transport};

/// Value returned when every source fails, in gwei.
pub const FALLBACK_GWEI: f64 = 0.001;

/// JSON-RPC method asked of every primary endpoint.
pub const GAS_PRICE_METHOD: &str = "eth_gasPrice";

const WEI_PER_GWEI: f64 = 1e9;

/// How the request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestShape {
    /// POST `{jsonrpc: "2.0", method, params: [], id: 1}`.
    JsonRpcPost { method: &'static str },
    /// Plain GET, everything is in the URL.
    Get,
}

/// Where the number lives in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// `{"result": "0x..."}`: base-16 integer quantity.
    HexResult,
    /// `{"result": {"ProposeGasPrice": "0.012"}}`: decimal string.
    ProposeGasPrice,
}

/// One remote endpoint definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceDescriptor {
    pub name: &'static str,
    pub url: &'static str,
    pub request: RequestShape,
    pub response: ResponseShape,
    /// The parsed number is divided by this to get gwei.
    pub unit_divisor: f64,
    /// Decimal places kept after scaling, if the source rounds.
    pub round_to: Option<u32>,
}

/// Ordered JSON-RPC endpoints for Base mainnet. First success wins.
pub const PRIMARY_SOURCES: &[SourceDescriptor] = &[
    SourceDescriptor::json_rpc("mainnet.base.org", "https://mainnet.base.org"),
    SourceDescriptor::json_rpc("base.llamarpc.com", "https://base.llamarpc.com"),
    SourceDescriptor::json_rpc(
        "base-mainnet.public.blastapi.io",
        "https://base-mainnet.public.blastapi.io",
    ),
];

/// Aggregator tried once after every primary has failed.
///
/// A non-2xx status is a failure here as for the primaries, even when the
/// body still carries a usable `ProposeGasPrice`; such a reply falls through
/// to [`FALLBACK_GWEI`].
pub const SECONDARY_SOURCE: SourceDescriptor = SourceDescriptor::gas_oracle(
    "etherscan-gasoracle",
    "https://api.etherscan.io/api?module=gastracker&action=gasoracle&chainid=8453",
);

impl SourceDescriptor {
    /// A primary-style endpoint: `eth_gasPrice` over JSON-RPC, wei → gwei,
    /// four decimals kept.
    pub const fn json_rpc(name: &'static str, url: &'static str) -> Self {
        Self {
            name,
            url,
            request: RequestShape::JsonRpcPost {
                method: GAS_PRICE_METHOD,
            },
            response: ResponseShape::HexResult,
            unit_divisor: WEI_PER_GWEI,
            round_to: Some(4),
        }
    }

    /// An aggregator-style endpoint answering `result.ProposeGasPrice` in gwei.
    pub const fn gas_oracle(name: &'static str, url: &'static str) -> Self {
        Self {
            name,
            url,
            request: RequestShape::Get,
            response: ResponseShape::ProposeGasPrice,
            unit_divisor: 1.0,
            round_to: None,
        }
    }

    /// JSON-RPC request body, or `None` for GET sources.
    pub fn request_body(&self) -> Option<Value> {
        match self.request {
            RequestShape::JsonRpcPost { method } => Some(json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": [],
                "id": 1,
            })),
            RequestShape::Get => None,
        }
    }

    /// Issue exactly one request and turn the body into gwei.
    pub fn fetch<T: Transport + ?Sized>(&self, transport: &T) -> Result<f64, SourceError> {
        let body = match self.request_body() {
            Some(payload) => transport.post_json(self.url, &payload)?,
            None => transport.get_json(self.url)?,
        };
        self.extract(&body)
    }

    /// Pull the number out of a decoded body and scale it.
    pub fn extract(&self, body: &Value) -> Result<f64, SourceError> {
        let raw = match self.response {
            ResponseShape::HexResult => {
                let field = non_empty_str(body.get("result")).ok_or(SourceError::MissingField("result"))?;
                parse_hex_quantity(field)? as f64
            }
            ResponseShape::ProposeGasPrice => {
                let field = body
                    .get("result")
                    .and_then(|r| r.get("ProposeGasPrice"))
                    .ok_or(SourceError::MissingField("result.ProposeGasPrice"))?;
                match field {
                    Value::Number(n) => n
                        .as_f64()
                        .ok_or_else(|| SourceError::Unparsable(n.to_string()))?,
                    other => {
                        let text = non_empty_str(Some(other))
                            .ok_or(SourceError::MissingField("result.ProposeGasPrice"))?;
                        parse_decimal_prefix(text)?
                    }
                }
            }
        };

        let scaled = raw / self.unit_divisor;
        let value = match self.round_to {
            Some(places) => round_to(scaled, places),
            None => scaled,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(SourceError::Unparsable(value.to_string()));
        }
        Ok(value)
    }
}

fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// Parse a JSON-RPC quantity: optional `0x` prefix, then the leading run of
/// hex digits. Trailing junk after the run is ignored.
pub fn parse_hex_quantity(raw: &str) -> Result<u128, SourceError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return Err(SourceError::Unparsable(raw.to_string()));
    }
    u128::from_str_radix(run, 16).map_err(|_| SourceError::Unparsable(raw.to_string()))
}

/// Parse the leading decimal number of a string (`"0.012 gwei"` → 0.012).
pub fn parse_decimal_prefix(raw: &str) -> Result<f64, SourceError> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let is_digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut digit_count = 0;
    while is_digit(end) {
        end += 1;
        digit_count += 1;
    }
    if end < len && bytes[end] == b'.' {
        end += 1;
        while is_digit(end) {
            end += 1;
            digit_count += 1;
        }
    }
    if digit_count == 0 {
        return Err(SourceError::Unparsable(raw.to_string()));
    }

    // Exponent only counts when digits follow it.
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .map_err(|_| SourceError::Unparsable(raw.to_string()))
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
