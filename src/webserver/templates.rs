/// HTML templates for the webserver
///
/// Each function returns a String that can be used in Axum Html responses.
use num_format::{Locale, ToFormattedString};

/// Landing page with the allocation form
pub fn index_page(token_name: &str, total_token_offered: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{token_name} Airdrop Estimator</title>
    <style>
        {common_styles}
    </style>
</head>
<body>
    <main class="card">
        <h1>{token_name} Airdrop Estimator</h1>
        <p class="subtitle">Total tokens offered: <strong>{total_token_offered}</strong></p>

        <form id="calculateForm">
            <label for="user_burn">Your burnt staking power</label>
            <input type="number" id="user_burn" name="user_burn" step="any" required>
            <button type="submit">Calculate</button>
        </form>

        <div id="result" class="result hidden"></div>
    </main>

    <script>
        {scripts}
    </script>
</body>
</html>"#,
        token_name = escape_html(token_name),
        total_token_offered = total_token_offered.to_formatted_string(&Locale::en),
        common_styles = common_styles(),
        scripts = scripts(),
    )
}

/// Escape text for safe inclusion in HTML
pub fn escape_html(text: &str) -> String {
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

fn common_styles() -> &'static str {
    r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0f172a;
            color: #e2e8f0;
            display: flex;
            justify-content: center;
            padding: 48px 16px;
        }

        .card {
            background: #1e293b;
            border-radius: 12px;
            padding: 32px;
            width: 100%;
            max-width: 480px;
        }

        h1 {
            font-size: 1.5rem;
            margin-bottom: 8px;
        }

        .subtitle {
            color: #94a3b8;
            margin-bottom: 24px;
        }

        form {
            display: flex;
            flex-direction: column;
            gap: 12px;
        }

        input {
            padding: 10px;
            border-radius: 8px;
            border: 1px solid #334155;
            background: #0f172a;
            color: inherit;
        }

        button {
            padding: 10px;
            border: none;
            border-radius: 8px;
            background: #6366f1;
            color: white;
            cursor: pointer;
        }

        .result {
            margin-top: 24px;
            line-height: 1.8;
        }

        .result.error {
            color: #f87171;
        }

        .hidden {
            display: none;
        }
    "#
}

fn scripts() -> &'static str {
    r#"
        const form = document.getElementById('calculateForm');
        const result = document.getElementById('result');

        const fmt = (value, digits) =>
            Number(value).toLocaleString('en-US', { maximumFractionDigits: digits });

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            result.className = 'result';
            result.textContent = 'Calculating...';

            try {
                const response = await fetch('/calculate', {
                    method: 'POST',
                    body: new URLSearchParams(new FormData(form)),
                });
                const data = await response.json();

                if (!response.ok || data.error) {
                    result.className = 'result error';
                    result.textContent = data.error || 'Request failed';
                    return;
                }

                result.innerHTML = '';
                const rows = [
                    ['Token price', '$' + fmt(data.token_price, 6)],
                    ['Total burnt', fmt(data.total_burnt, 2)],
                    ['Tokens received', fmt(data.tokens_received, 4) + ' ' + data.token_name],
                    ['Airdrop value', '$' + fmt(data.airdrop_value, 2)],
                ];
                for (const [label, value] of rows) {
                    const line = document.createElement('div');
                    line.textContent = label + ': ' + value;
                    result.appendChild(line);
                }
            } catch (err) {
                result.className = 'result error';
                result.textContent = 'Network error: ' + err;
            }
        });
    "#
}
