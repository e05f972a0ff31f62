//! Server-rendered pages for the web form

const STYLE: &str = r#"
body { background: linear-gradient(135deg,#e8f0ff,#c7d6ff); font-family: 'Segoe UI', sans-serif; margin: 0; padding: 24px; }
.header-box { display: flex; align-items: center; gap: 16px; background: #c7d9ff; border: 1px solid #8fb0ff; padding: 16px; border-radius: 14px; }
.logo { width: 64px; height: 64px; border-radius: 16px; background: linear-gradient(135deg,#6EA8FF,#3D6BFF); color: #fff; font-weight: bold; font-size: 24px; display: flex; align-items: center; justify-content: center; }
.card { background: #fff; border: 1px solid #d8e7ff; padding: 18px; border-radius: 12px; margin-top: 18px; }
textarea { width: 100%; min-height: 120px; box-sizing: border-box; }
button { width: 100%; padding: 10px; margin-top: 12px; }
.user-bubble { background: #e5efff; padding: 12px; border-radius: 12px; border-left: 4px solid #2979ff; margin-top: 18px; }
.bot-bubble { background: #f1f7ff; padding: 12px; border-radius: 12px; border-left: 4px solid #0288d1; margin-top: 12px; }
.warning { background: #fff4e5; padding: 12px; border-radius: 12px; border-left: 4px solid #ff9800; margin-top: 18px; }
"#;

const FORM: &str = r#"<div class="card">
<form action="/help" method="post" enctype="multipart/form-data">
<label for="text">Write your problem:</label>
<textarea id="text" name="text" placeholder="Type here…"></textarea>
<label for="image">Upload image (optional)</label>
<input id="image" name="image" type="file" accept=".png,.jpg,.jpeg,image/png,image/jpeg">
<button type="submit">Get Help</button>
</form>
</div>"#;

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape and render newlines as line breaks
pub fn render_multiline(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>")
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Life Unstuck AI</title>
<style>{style}</style>
</head>
<body>
<div class="header-box">
<div class="logo">LUI</div>
<div><h2 style="margin:0;">Life Unstuck AI</h2><p style="margin:0;color:#333;">Two-step action plans powered by Gemini</p></div>
</div>
{form}
{body}
</body>
</html>"#,
        style = STYLE,
        form = FORM,
        body = body,
    )
}

/// Empty form
pub fn index_page() -> String {
    page("")
}

/// Form followed by the user's message and the answer
pub fn answer_page(user_text: &str, answer: &str) -> String {
    page(&format!(
        r#"<div class="user-bubble"><b>You:</b><br>{}</div>
<div class="bot-bubble"><b>Life Unstuck AI:</b><br>{}</div>"#,
        render_multiline(user_text),
        render_multiline(answer),
    ))
}

/// Form followed by a warning
pub fn warning_page(message: &str) -> String {
    page(&format!(r#"<div class="warning">{}</div>"#, escape_html(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_multiline() {
        assert_eq!(render_multiline("1) a\n2) b\r\nTip: <c>"), "1) a<br>2) b<br>Tip: &lt;c&gt;");
    }

    #[test]
    fn test_answer_page_contains_both_bubbles() {
        let html = answer_page("I'm stuck", "1) Breathe\n\nTip: Rest");
        assert!(html.contains("I&#39;m stuck"));
        assert!(html.contains("1) Breathe<br><br>Tip: Rest"));
        assert!(html.contains(r#"name="image""#));
    }
}
