//! Client for the DeepL translation API.
//!
//! Every call is a single form-encoded POST carrying the auth key, the target language and the
//! text. Only the first entry of the response's `translations` array is used.

use std::collections::BTreeMap;

use url::Url;

use super::*;
use crate::config::Credentials;

/// Response body of the translate endpoint.
#[derive(Debug, Deserialize)]
struct TranslationResponse {
  /// One translation per submitted text
  translations: Vec<Translation>,
}

/// A single translation in the response.
#[derive(Debug, Deserialize)]
struct Translation {
  /// The translated text
  text: String,
}

/// Client for the DeepL translate endpoint.
#[derive(Debug)]
pub struct DeepLClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// The translate endpoint (e.g. "https://api-free.deepl.com/v2/translate")
  endpoint: Url,
  /// Form parameters sent with every request: `auth_key` and `target_lang`
  params:   BTreeMap<String, String>,
}

impl DeepLClient {
  /// Creates a client from credentials, translating into `target_lang` (e.g. "JA").
  pub fn new(credentials: &Credentials, target_lang: &str) -> Result<Self, DigestError> {
    let mut params = credentials.params();
    params.insert("target_lang".to_string(), target_lang.to_string());
    Ok(Self { client: reqwest::Client::new(), endpoint: credentials.endpoint()?, params })
  }

  /// The form parameters for translating `text`.
  fn form(&self, text: &str) -> BTreeMap<String, String> {
    let mut form = self.params.clone();
    form.insert("text".to_string(), text.to_string());
    form
  }
}

#[async_trait]
impl Translate for DeepLClient {
  async fn translate(&self, text: &str) -> Result<String, DigestError> {
    debug!("Translating {} characters via {}", text.chars().count(), self.endpoint);

    let response = self
      .client
      .post(self.endpoint.clone())
      .form(&self.form(text))
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    trace!("DeepL response: {response}");

    parse_translation(&response)
  }
}

/// Extracts the first translation from a response body.
fn parse_translation(body: &str) -> Result<String, DigestError> {
  let response: TranslationResponse = serde_json::from_str(body)?;
  response
    .translations
    .into_iter()
    .next()
    .map(|translation| translation.text)
    .ok_or_else(|| DigestError::ApiError("translation response has no translations".into()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn credentials() -> Credentials {
    Credentials {
      scheme:   "https".into(),
      fqdn:     "api-free.deepl.com".into(),
      path:     "v2/translate".into(),
      auth_key: "secret".into(),
    }
  }

  #[test]
  fn test_form_parameters() -> anyhow::Result<()> {
    let client = DeepLClient::new(&credentials(), "JA")?;
    let form = client.form("Hello");

    assert_eq!(client.endpoint.as_str(), "https://api-free.deepl.com/v2/translate");
    assert_eq!(form.len(), 3);
    assert_eq!(form["auth_key"], "secret");
    assert_eq!(form["target_lang"], "JA");
    assert_eq!(form["text"], "Hello");
    assert!(!client.params.contains_key("text"));
    Ok(())
  }

  #[test]
  fn test_parse_translation() -> anyhow::Result<()> {
    let body = r#"{"translations":[{"detected_source_language":"EN","text":"こんにちは"},{"text":"x"}]}"#;
    assert_eq!(parse_translation(body)?, "こんにちは");
    Ok(())
  }

  #[test]
  fn test_parse_translation_without_translations() {
    assert!(matches!(parse_translation(r#"{"message":"Forbidden"}"#), Err(DigestError::Json(_))));
    assert!(matches!(
      parse_translation(r#"{"translations":[]}"#),
      Err(DigestError::ApiError(_))
    ));
    assert!(matches!(parse_translation("not json"), Err(DigestError::Json(_))));
  }

  #[ignore = "needs DeepL credentials in the default location"]
  #[traced_test]
  #[tokio::test]
  async fn test_deepl_translate() -> anyhow::Result<()> {
    let credentials = Credentials::load(Credentials::default_path())?;
    let client = DeepLClient::new(&credentials, "JA")?;
    let text = client.translate("The neutron lifetime").await?;
    assert!(!text.is_empty());
    Ok(())
  }
}
