//! Pages served by the loopback redirect listener.

pub const FORWARD_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Completing sign in...</title>
</head>
<body>
    <noscript>JavaScript is required to finish signing in.</noscript>
    <script>
        var hash = window.location.hash;
        var params = hash.length > 1 ? hash.substring(1) : window.location.search.substring(1);
        window.location.replace("/complete?" + params);
    </script>
</body>
</html>"#;

const STYLE: &str = r#"
        body {
            margin: 0;
            padding: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: #0e0e10;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .container {
            background: #18181b;
            border-radius: 12px;
            padding: 48px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.4);
            text-align: center;
            max-width: 400px;
        }
        .icon {
            width: 64px;
            height: 64px;
            border-radius: 50%;
            color: white;
            display: inline-flex;
            align-items: center;
            justify-content: center;
            font-size: 32px;
            margin-bottom: 24px;
        }
        .ok { background: #9147ff; }
        .fail { background: #e91916; }
        h1 {
            color: #efeff1;
            margin: 0 0 12px 0;
            font-size: 24px;
            font-weight: 600;
        }
        p {
            color: #adadb8;
            margin: 0 0 24px 0;
            line-height: 1.5;
        }
        .error-details {
            background: #2a0f10;
            border-radius: 8px;
            padding: 16px;
            color: #ff8280;
            font-family: monospace;
            font-size: 14px;
            margin-bottom: 24px;
        }
"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{TITLE}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        {CONTENT}
    </div>
</body>
</html>"#;

pub fn success_page() -> String {
    PAGE_TEMPLATE
        .replace("{TITLE}", "Authentication Successful")
        .replace("{STYLE}", STYLE)
        .replace(
            "{CONTENT}",
            r#"<div class="icon ok">✓</div>
        <h1>Authentication Successful!</h1>
        <p>Your Twitch account is connected. You can close this window and return to your terminal.</p>"#,
        )
}

pub fn error_page(message: &str) -> String {
    let content = format!(
        r#"<div class="icon fail">✗</div>
        <h1>Authentication Failed</h1>
        <p>Could not connect your Twitch account.</p>
        <div class="error-details">{}</div>
        <p>Please close this window and try again from your terminal.</p>"#,
        escape_html(message)
    );

    PAGE_TEMPLATE
        .replace("{TITLE}", "Authentication Error")
        .replace("{STYLE}", STYLE)
        .replace("{CONTENT}", &content)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
