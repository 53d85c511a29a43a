//! Verification email body.

/// Subject line of the verification email.
pub const SUBJECT: &str = "Email verification";

/// Renders the HTML body with a single call-to-action button.
pub fn render(email: &str, link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; background-color: #f4f4f7; padding: 24px;">
    <div style="max-width: 560px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
      <h2 style="color: #333333;">Welcome!</h2>
      <p style="color: #51545e;">An account was created for {email}.</p>
      <p style="color: #51545e;">Please confirm your email address to finish creating your account.</p>
      <p style="text-align: center; margin: 32px 0;">
        <a href="{link}" style="background-color: #22bc66; color: #ffffff; padding: 12px 24px; border-radius: 4px; text-decoration: none;">Verify Email Address</a>
      </p>
      <p style="color: #51545e; font-size: 13px;">If you did not sign up, you can ignore this email.</p>
    </div>
  </body>
</html>"#,
        email = escape(email),
        link = escape(link),
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_button_and_escaped_link() {
        let html = render("ada@x.test", "http://x.test/confirm?a=1&b=2");
        assert!(html.contains("Verify Email Address"));
        assert!(html.contains("href=\"http://x.test/confirm?a=1&amp;b=2\""));
        assert!(html.contains("ada@x.test"));
    }
}
