//! Prompt builders for ticker extraction and sentiment classification

/// System prompt for the ticker extraction call
pub const TICKER_SYSTEM_PROMPT: &str = "You are a financial data assistant. \
     You identify stock ticker symbols from web search results. \
     Respond only with JSON.";

/// System prompt for the sentiment classification call
pub const SENTIMENT_SYSTEM_PROMPT: &str = "You are a consumer sentiment analyst. \
     You judge how text reflects on a company's products. \
     Respond only with JSON.";

/// Build the ticker extraction prompt
///
/// The model is expected to answer `{"ticker": "SYM"}` or
/// `{"ticker": null}` when no symbol can be determined.
pub fn ticker_extraction_prompt(company_name: &str, context: &str) -> String {
    format!(
        "Identify the stock ticker symbol for the company \"{company_name}\" \
         from the search results below.\n\n\
         Search results:\n{context}\n\n\
         Respond with JSON in exactly this form:\n\
         {{\"ticker\": \"SYMBOL\"}}\n\
         If the ticker cannot be determined, respond with:\n\
         {{\"ticker\": null}}"
    )
}

/// Build the sentiment classification prompt
///
/// The model is expected to answer with a JSON object carrying
/// `sentiment_score`, `sentiment_label`, `similarity_score`, and `summary`.
pub fn sentiment_classification_prompt(company_name: &str, text: &str) -> String {
    format!(
        "Analyze the following text for consumer sentiment toward the products \
         of \"{company_name}\".\n\n\
         Text:\n{text}\n\n\
         Respond with JSON in exactly this form:\n\
         {{\"sentiment_score\": <number between -1.0 and 1.0>, \
         \"sentiment_label\": \"positive\" | \"negative\" | \"neutral\", \
         \"similarity_score\": <number between 0.0 and 1.0, how relevant the \
         text is to the company's products>, \
         \"summary\": \"<one or two sentence summary>\"}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_prompt_carries_inputs() {
        let prompt = ticker_extraction_prompt("Acme Corp", "Acme Corp (ACME) is listed on NYSE");
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("ACME"));
        assert!(prompt.contains("{\"ticker\": null}"));
    }

    #[test]
    fn test_sentiment_prompt_carries_inputs() {
        let prompt = sentiment_classification_prompt("Acme Corp", "The widgets are great");
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("The widgets are great"));
        assert!(prompt.contains("sentiment_label"));
    }
}
