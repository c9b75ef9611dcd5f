//! Minimal server-rendered views for the front service.

use axum::response::Html;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title} - Promeni</title></head>\n",
            "<body>\n",
            "<nav>",
            "<a href=\"/Home/Index\">Home</a> ",
            "<a href=\"/Home/SignIn\">Sign in</a> ",
            "<a href=\"/Home/CreateUser\">Create account</a> ",
            "<a href=\"/Home/AccountPage\">Account</a> ",
            "<a href=\"/Home/PostData\">Post data</a> ",
            "<a href=\"/Home/LogOut\">Log out</a>",
            "</nav>\n",
            "{body}\n",
            "</body>\n",
            "</html>\n"
        ),
        title = title,
        body = body
    ))
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn message_block(message: Option<&str>) -> String {
    message.map_or_else(String::new, |text| {
        format!("<p class=\"message\">{}</p>\n", escape(text))
    })
}

pub fn index(signed_in_email: Option<&str>) -> Html<String> {
    let greeting = signed_in_email.map_or_else(
        || "<p>You are not signed in.</p>".to_string(),
        |email| format!("<p>Signed in as {}</p>", escape(email)),
    );
    layout("Home", &format!("<h1>Walk guides</h1>\n{greeting}"))
}

pub fn sign_in(email: &str, message: Option<&str>) -> Html<String> {
    let body = format!(
        concat!(
            "<h1>Sign in</h1>\n",
            "{message}",
            "<form method=\"post\" action=\"/Home/SignIn\">\n",
            "<label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n",
            "<label>Password <input type=\"password\" name=\"password\"></label>\n",
            "<button type=\"submit\">Sign in</button>\n",
            "</form>"
        ),
        message = message_block(message),
        email = escape(email)
    );
    layout("Sign in", &body)
}

/// The password field is never refilled on errors; only the email comes back.
pub fn create_user(email: &str, message: Option<&str>) -> Html<String> {
    let body = format!(
        concat!(
            "<h1>Create account</h1>\n",
            "{message}",
            "<form method=\"post\" action=\"/Home/CreateUser\">\n",
            "<label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n",
            "<label>Password <input type=\"password\" name=\"password\"></label>\n",
            "<button type=\"submit\">Create account</button>\n",
            "</form>"
        ),
        message = message_block(message),
        email = escape(email)
    );
    layout("Create account", &body)
}

pub fn account(message: Option<&str>) -> Html<String> {
    let body = format!(
        concat!(
            "<h1>Account</h1>\n",
            "{message}",
            "<form method=\"post\" action=\"/Home/AccountPage\">\n",
            "<button type=\"submit\">Send password reset email</button>\n",
            "</form>"
        ),
        message = message_block(message)
    );
    layout("Account", &body)
}

pub fn post_data() -> Html<String> {
    layout(
        "Post data",
        concat!(
            "<h1>Post data</h1>\n",
            "<form method=\"post\" action=\"/Home/PostDataSend\">\n",
            "<button type=\"submit\">Send to API</button>\n",
            "</form>"
        ),
    )
}

pub fn error(request_id: &str) -> Html<String> {
    let body = format!(
        "<h1>Error</h1>\n<p>An error occurred while processing your request.</p>\n<p>Request id: {}</p>",
        escape(request_id)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>"&"</script>"#),
            "&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn sign_in_redisplays_email_but_never_password() {
        let page = sign_in("user@example.com", Some("Unknown error")).0;
        assert!(page.contains("value=\"user@example.com\""));
        assert!(page.contains("Unknown error"));
        // The password input carries no value attribute at all.
        assert!(page.contains("<input type=\"password\" name=\"password\">"));
    }

    #[test]
    fn index_reflects_session_state() {
        assert!(index(None).0.contains("not signed in"));
        assert!(index(Some("user@example.com")).0.contains("user@example.com"));
    }
}
