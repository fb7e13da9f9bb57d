use mrclean::{GenerationMode, Sanitize, SanitizerTable};

#[allow(dead_code)]
#[derive(mrclean::PackageId)]
#[package_id(debug = false)]
struct SanitizePackage;

mrclean::include_root_function!("vault");
mrclean::include_sanitizations!("vault");

#[derive(Debug, Sanitize)]
pub struct Credential {
    pub user: String,
    pub secret: String,
}

impl Credential {
    pub fn new(user: &str, secret: &str) -> Self {
        Self {
            user: user.to_string(),
            secret: secret.to_string(),
        }
    }
}

#[derive(Debug, Sanitize)]
pub struct ApiKey(pub String, #[mrclean(debug)] pub Vec<String>);

/// Not tagged: the release placeholder panics for it.
#[derive(Debug)]
pub struct AuditNote {
    pub text: String,
}

impl AuditNote {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

pub fn sanitizer_table() -> SanitizerTable {
    let mut table = SanitizerTable::new(GenerationMode::Release);
    register_sanitizations(&mut table);
    table
}
