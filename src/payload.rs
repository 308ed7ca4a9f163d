//! Odds payloads, as produced by the browser bookmarklet that scrapes a trio odds page: a JSON object
//! of ticket identifiers to odds, encoded as URL-safe base64 without padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::odds::{InvalidQuote, OddsTable, RawOdds};

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a JSON odds object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Quote(#[from] InvalidQuote),
}

/// Decodes a payload into an [OddsTable]. Trailing `=` padding is tolerated; an empty payload
/// yields an empty table.
pub fn decode(payload: &str) -> Result<OddsTable, PayloadError> {
    let payload = payload.trim().trim_end_matches('=');
    if payload.is_empty() {
        return Ok(OddsTable::default());
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let raw: RawOdds = serde_json::from_slice(&bytes)?;
    Ok(OddsTable::try_from(&raw)?)
}

/// Encodes `odds` as a compact payload, with tickets in ascending order.
pub fn encode(odds: &OddsTable) -> Result<String, PayloadError> {
    let raw = RawOdds::from(odds);
    let json = serde_json::to_vec(&raw)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use base64::engine::general_purpose::URL_SAFE;

    use crate::odds::Odds;
    use crate::ticket::Ticket;

    use super::*;

    fn ticket(id: &str) -> Ticket {
        Ticket::from_str(id).unwrap()
    }

    #[test]
    fn decode_mixed_quotes() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"235":5.4,"237":"12.5"}"#);
        let table = decode(&payload).unwrap();
        assert_eq!(
            vec![
                (ticket("235"), Odds::try_from(5.4).unwrap()),
                (ticket("237"), Odds::try_from(12.5).unwrap())
            ],
            table.sorted()
        );
    }

    #[test]
    fn decode_padded() {
        let payload = URL_SAFE.encode(r#"{"123":2.0}"#);
        assert!(payload.ends_with('='));
        let table = decode(&payload).unwrap();
        assert_eq!(Some(Odds::try_from(2.0).unwrap()), table.get(&ticket("123")));
    }

    #[test]
    fn decode_empty() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode("{}")).unwrap().is_empty());
    }

    #[test]
    fn decode_errors() {
        assert!(matches!(decode("!!!"), Err(PayloadError::Base64(_))));
        assert!(matches!(
            decode(&URL_SAFE_NO_PAD.encode("[1, 2]")),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            decode(&URL_SAFE_NO_PAD.encode(r#"{"123":"evens"}"#)),
            Err(PayloadError::Quote(_))
        ));
        assert!(matches!(
            decode(&URL_SAFE_NO_PAD.encode(r#"{"123":0}"#)),
            Err(PayloadError::Quote(_))
        ));
    }

    #[test]
    fn encode_sorted_and_unpadded() {
        let table: OddsTable = [
            (ticket("357"), Odds::try_from(20.0).unwrap()),
            (ticket("235"), Odds::try_from(5.4).unwrap()),
        ]
        .into_iter()
        .collect();
        let payload = encode(&table).unwrap();
        assert!(!payload.contains('='));
        let json = URL_SAFE_NO_PAD.decode(&payload).unwrap();
        assert_eq!(r#"{"235":5.4,"357":20.0}"#, String::from_utf8(json).unwrap());
        assert_eq!(table, decode(&payload).unwrap());
    }
}
