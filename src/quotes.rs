use std::time::Duration;

use anyhow::{bail, Result};
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

/// A motivational quote with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Bundled quotes shown whenever the remote service is unreachable.
pub const FALLBACK_QUOTES: [(&str, &str); 10] = [
    ("The only way to do great work is to love what you do.", "Steve Jobs"),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    ("It does not matter how slowly you go as long as you do not stop.", "Confucius"),
    ("Believe you can and you're halfway there.", "Theodore Roosevelt"),
    ("Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    (
        "The only limit to our realization of tomorrow will be our doubts of today.",
        "Franklin D. Roosevelt",
    ),
    ("It always seems impossible until it's done.", "Nelson Mandela"),
    (
        "Your time is limited, so don't waste it living someone else's life.",
        "Steve Jobs",
    ),
    ("The way to get started is to quit talking and begin doing.", "Walt Disney"),
];

const QUOTE_URL: &str = "https://zenquotes.io/api/random";
const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

/// Best-effort fetch from the public quote API. Any failure (network,
/// decode, empty body) is logged and reported as `None`.
pub fn fetch_remote() -> Option<Quote> {
    match try_fetch() {
        Ok(quote) => Some(quote),
        Err(e) => {
            debug!(error = %e, "quote fetch failed, using fallback");
            None
        }
    }
}

fn try_fetch() -> Result<Quote> {
    let client = reqwest::blocking::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let body: Vec<ZenQuote> = client.get(QUOTE_URL).send()?.json()?;
    let Some(first) = body.into_iter().next() else {
        bail!("empty quote response");
    };
    if first.q.is_empty() || first.a.is_empty() {
        bail!("quote response missing text or author");
    }
    Ok(Quote { text: first.q, author: first.a })
}

/// Picks a bundled quote at random, avoiding an immediate repeat of the
/// previously shown index. Returns the chosen index alongside the quote.
pub fn fallback_quote(avoid: Option<usize>) -> (usize, Quote) {
    let mut rng = rand::thread_rng();
    let mut idx = rng.gen_range(0..FALLBACK_QUOTES.len());
    if FALLBACK_QUOTES.len() > 1 {
        while Some(idx) == avoid {
            idx = rng.gen_range(0..FALLBACK_QUOTES.len());
        }
    }
    let (text, author) = FALLBACK_QUOTES[idx];
    (idx, Quote { text: text.to_string(), author: author.to_string() })
}

/// A quote for display: the remote service when reachable, a bundled
/// fallback otherwise. `offline` skips the network entirely.
pub fn random_quote(offline: bool) -> Quote {
    if !offline {
        if let Some(quote) = fetch_remote() {
            return quote;
        }
    }
    fallback_quote(None).1
}
