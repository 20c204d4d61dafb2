//! Offline [`TextOracle`] answering from a fixed table of templates.
//!
//! Prompts are lower-cased and matched by substring, first match wins.

use crate::domain::error::SmartTradeError;
use crate::ports::oracle_port::TextOracle;

pub const GREETING: &str =
    "I am SmartTradeAI. How can I assist with your trading strategy today?";
pub const MISSING_KEY: &str = "API Key not configured. Please set up your API key.";
/// Key the offline oracle runs with when none is configured.
pub const MOCK_API_KEY: &str = "mock_api_key_present";

const TEMPLATES: &[(&str, &str)] = &[
    (
        "tata motors",
        "Tata Motors is a strong player in the EV sector. Recent sales figures are encouraging, \
         and the launch of their new models could be a significant catalyst. Technical indicators \
         suggest a potential breakout above 1050. A good entry point could be around 980 with a \
         stop-loss at 940.",
    ),
    (
        "reliance",
        "Reliance Industries is showing strong bullish momentum. Based on recent volume spikes \
         and positive news sentiment, a short-term target of 3,200 seems plausible. Consider \
         setting a stop-loss around 2,950. The RSI is at 65, indicating it's approaching \
         overbought territory, so trade with caution.",
    ),
    (
        "nifty",
        "Nifty 50 is currently trading near a key resistance level of 23,500. A breakout above \
         this could lead to a rally towards 24,000. However, global market cues are mixed. I \
         recommend a cautious approach. A straddle strategy on the weekly options might be a good \
         way to play the potential volatility.",
    ),
    (
        "portfolio",
        "Analyzing your portfolio... Your portfolio seems heavily weighted towards the IT sector. \
         While this has performed well, consider diversifying into FMCG or Banking to hedge \
         against sector-specific risks. Top recommendation for diversification: HDFC Bank, given \
         its recent correction and strong fundamentals.",
    ),
    (
        "banking sector",
        "The banking sector is looking positive, with strong credit growth and improving asset \
         quality. HDFC Bank and ICICI Bank are top picks. For a more aggressive play, consider \
         smaller banks like IDFC First Bank, which have high growth potential but also higher \
         risk.",
    ),
    (
        "ev sector",
        "The EV sector in India is poised for significant growth. Besides Tata Motors, keep an \
         eye on Mahindra & Mahindra. In the auto ancillary space, companies like Tata Power \
         (charging infrastructure) and Exide Industries (battery technology) are good long-term \
         bets.",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct CannedOracle {
    api_key: Option<String>,
}

impl CannedOracle {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl TextOracle for CannedOracle {
    fn respond(&self, prompt: &str) -> Result<String, SmartTradeError> {
        if !self.is_configured() {
            return Ok(MISSING_KEY.to_string());
        }
        let lowered = prompt.to_lowercase();
        let answer = TEMPLATES
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, text)| *text)
            .unwrap_or(GREETING);
        tracing::debug!(prompt, "canned oracle answered");
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> CannedOracle {
        CannedOracle::new(Some("demo-key".into()))
    }

    #[test]
    fn unconfigured_oracle_asks_for_key() {
        assert_eq!(CannedOracle::new(None).respond("nifty").unwrap(), MISSING_KEY);
        assert_eq!(
            CannedOracle::new(Some("  ".into())).respond("nifty").unwrap(),
            MISSING_KEY
        );
    }

    #[test]
    fn matches_case_insensitively() {
        let answer = oracle().respond("What about RELIANCE today?").unwrap();
        assert!(answer.starts_with("Reliance Industries"));
    }

    #[test]
    fn first_match_wins() {
        // "tata motors" is checked before "ev sector".
        let answer = oracle().respond("Tata Motors in the EV sector").unwrap();
        assert!(answer.starts_with("Tata Motors is a strong player"));
    }

    #[test]
    fn sector_prompts() {
        assert!(oracle()
            .respond("For the banking sector: picks?")
            .unwrap()
            .starts_with("The banking sector"));
        assert!(oracle()
            .respond("thoughts on the ev sector")
            .unwrap()
            .starts_with("The EV sector"));
    }

    #[test]
    fn unknown_prompt_gets_greeting() {
        assert_eq!(oracle().respond("hello").unwrap(), GREETING);
    }

    #[test]
    fn strategy_prompt_for_unlisted_symbol_gets_greeting() {
        let answer = oracle()
            .respond("Generate profit booking strategy for SBIN")
            .unwrap();
        assert_eq!(answer, GREETING);
    }
}
