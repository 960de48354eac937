//! Shared page shell and HTML escaping

/// Escape text for HTML element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the common document shell
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - My Top Movies</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            margin-bottom: 30px;
        }}
        h1 a {{
            font-size: 26px;
            color: #4a9eff;
            text-decoration: none;
        }}
        main {{
            padding: 0 20px 40px;
            max-width: 960px;
            margin: 0 auto;
        }}
        h2 {{
            color: #4a9eff;
            margin-bottom: 15px;
        }}
        .button {{
            display: inline-block;
            padding: 10px 20px;
            background: #4a9eff;
            color: white;
            text-decoration: none;
            border: none;
            border-radius: 4px;
            margin: 10px 5px 10px 0;
            font-weight: 600;
            cursor: pointer;
        }}
        .button:hover {{
            background: #3a8eef;
        }}
        .button.danger {{
            background: #ef4444;
        }}
        .card {{
            display: flex;
            gap: 20px;
            background: #2a2a2a;
            border: 1px solid #3a3a3a;
            border-radius: 6px;
            padding: 15px;
            margin-bottom: 20px;
        }}
        .card img {{
            width: 140px;
            border-radius: 4px;
        }}
        .rank {{
            font-size: 40px;
            font-weight: 700;
            color: #4a9eff;
        }}
        .meta {{
            color: #888;
        }}
        .review {{
            font-style: italic;
            margin: 8px 0;
        }}
        form label {{
            display: block;
            margin-top: 15px;
        }}
        form input[type=text] {{
            width: 100%;
            padding: 8px;
            background: #111;
            color: #e0e0e0;
            border: 1px solid #3a3a3a;
            border-radius: 4px;
        }}
        form .invalid input[type=text] {{
            border-color: #ef4444;
        }}
        .field-error {{
            color: #ef4444;
            font-size: 14px;
        }}
        .candidates li {{
            list-style: none;
            padding: 8px 0;
            border-bottom: 1px solid #3a3a3a;
        }}
        .candidates a {{
            color: #4a9eff;
        }}
        .hint {{
            color: #f59e0b;
            font-size: 14px;
            margin-left: 8px;
        }}
        .empty-result {{
            color: #888;
            margin: 20px 0;
        }}
    </style>
</head>
<body>
    <header>
        <h1><a href="/">My Top Movies</a></h1>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}
