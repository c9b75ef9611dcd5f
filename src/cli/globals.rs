use secrecy::SecretString;

/// Identity-provider settings shared by the front and API services.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub identity_url: String,
    pub api_key: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(identity_url: String, api_key: SecretString) -> Self {
        Self {
            identity_url,
            api_key,
        }
    }
}
