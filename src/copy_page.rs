//! The HTML "copy page": a static, self-contained document that shows the
//! text and copies it to the clipboard with one tap.
//!
//! The page carries its own styling and script. The script tries the
//! asynchronous clipboard API first and falls back to selecting a hidden
//! `<textarea>` and running `document.execCommand('copy')`.

/// File name the copy page is offered under.
pub const COPY_PAGE_FILE_NAME: &str = "copy.html";
/// MIME type of the copy page.
pub const HTML_MIME: &str = "text/html";
/// File name the QR image is offered under.
pub const PNG_FILE_NAME: &str = "qr-code.png";
/// MIME type of the QR image.
pub const PNG_MIME: &str = "image/png";

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Copy Text</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .container {
            background: white;
            border-radius: 20px;
            padding: 40px;
            box-shadow: 0 20px 40px rgba(0,0,0,0.1);
            max-width: 500px;
            width: 100%;
            text-align: center;
        }
        .icon {
            font-size: 48px;
            margin-bottom: 20px;
        }
        h1 {
            color: #333;
            margin-bottom: 10px;
            font-size: 24px;
        }
        .subtitle {
            color: #666;
            margin-bottom: 30px;
            font-size: 16px;
        }
        .text-content {
            background: #f8f9fa;
            border: 2px solid #e9ecef;
            border-radius: 12px;
            padding: 20px;
            margin: 20px 0;
            font-family: monospace;
            font-size: 14px;
            line-height: 1.5;
            word-break: break-all;
            text-align: left;
            max-height: 200px;
            overflow-y: auto;
        }
        .copy-btn {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            border: none;
            padding: 15px 30px;
            border-radius: 50px;
            font-size: 18px;
            font-weight: 600;
            cursor: pointer;
            transition: all 0.3s ease;
            box-shadow: 0 4px 15px rgba(102, 126, 234, 0.4);
            display: inline-flex;
            align-items: center;
            gap: 10px;
        }
        .copy-btn:hover {
            transform: translateY(-2px);
            box-shadow: 0 6px 20px rgba(102, 126, 234, 0.6);
        }
        .copy-btn:active {
            transform: translateY(0);
        }
        .success {
            background: linear-gradient(135deg, #4CAF50 0%, #45a049 100%);
            box-shadow: 0 4px 15px rgba(76, 175, 80, 0.4);
        }
        .success:hover {
            box-shadow: 0 6px 20px rgba(76, 175, 80, 0.6);
        }
        @media (max-width: 600px) {
            .container {
                margin: 10px;
                padding: 30px 20px;
            }
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="icon">📋</div>
        <h1>Copy Text Content</h1>
        <p class="subtitle">Tap the button below to copy this text to your clipboard</p>

        <div class="text-content">"##;

const PAGE_MIDDLE: &str = r##"</div>

        <button class="copy-btn" id="copyBtn" onclick="copyText()">
            <span id="btnIcon">📄</span>
            <span id="btnText">Copy to Clipboard</span>
        </button>
    </div>

    <script>
        const textToCopy = ""##;

const PAGE_TAIL: &str = r##"";

        function copyText() {
            const btn = document.getElementById('copyBtn');
            const btnIcon = document.getElementById('btnIcon');
            const btnText = document.getElementById('btnText');

            if (navigator.clipboard) {
                navigator.clipboard.writeText(textToCopy).then(() => {
                    showSuccess();
                }).catch(() => {
                    fallbackCopy();
                });
            } else {
                fallbackCopy();
            }

            function showSuccess() {
                btn.classList.add('success');
                btnIcon.textContent = '✅';
                btnText.textContent = 'Copied!';

                setTimeout(() => {
                    btn.classList.remove('success');
                    btnIcon.textContent = '📄';
                    btnText.textContent = 'Copy to Clipboard';
                }, 2000);
            }

            function fallbackCopy() {
                const textArea = document.createElement('textarea');
                textArea.value = textToCopy;
                textArea.style.position = 'fixed';
                textArea.style.left = '-999999px';
                textArea.style.top = '-999999px';
                document.body.appendChild(textArea);
                textArea.focus();
                textArea.select();

                try {
                    document.execCommand('copy');
                    showSuccess();
                } catch (err) {
                    btnText.textContent = 'Copy failed - select text above';
                }

                document.body.removeChild(textArea);
            }
        }
    </script>
</body>
</html>
"##;

const COMPACT_HEAD: &str = r##"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><meta name="viewport" content="width=device-width,initial-scale=1"><title>Copy Text</title><style>body{font-family:sans-serif;margin:0;padding:20px;background:linear-gradient(135deg,#667eea,#764ba2);min-height:100vh;display:flex;align-items:center;justify-content:center}.c{background:#fff;border-radius:20px;padding:30px;max-width:500px;width:100%;text-align:center}.text-content{background:#f8f9fa;border:2px solid #e9ecef;border-radius:12px;padding:16px;margin:20px 0;font-family:monospace;word-break:break-all;text-align:left}button{background:linear-gradient(135deg,#667eea,#764ba2);color:#fff;border:0;padding:15px 30px;border-radius:50px;font-size:18px}.ok{background:#4CAF50}</style></head><body><div class="c"><h1>Copy Text</h1><div class="text-content">"##;

const COMPACT_MIDDLE: &str = r##"</div><button id="b" onclick="cp()">Copy to Clipboard</button></div><script>const textToCopy = ""##;

const COMPACT_TAIL: &str = r##"";function ok(){var b=document.getElementById('b');b.className='ok';b.textContent='Copied!'}function fb(){var a=document.createElement('textarea');a.value=textToCopy;a.style.position='fixed';a.style.left='-9999px';document.body.appendChild(a);a.select();try{document.execCommand('copy');ok()}catch(e){document.getElementById('b').textContent='Copy failed - select text above'}document.body.removeChild(a)}function cp(){navigator.clipboard?navigator.clipboard.writeText(textToCopy).then(ok,fb):fb()}</script></body></html>"##;

/// Renders the copy page for `text`.
///
/// The text appears twice: once as visible markup (see [`escape_html`]) and
/// once as the string literal the script copies (see [`escape_js_string`]).
/// Output depends only on `text`.
///
/// # Example
///
/// ```rust
/// use qrcopy::copy_page::render_copy_page;
///
/// let html = render_copy_page("a < b");
/// assert!(html.contains("a &lt; b"));
/// assert!(html.contains(r#"const textToCopy = "a \x3C b";"#));
/// ```
pub fn render_copy_page(text: &str) -> String {
    assemble([PAGE_HEAD, PAGE_MIDDLE, PAGE_TAIL], text)
}

/// Renders a minified copy page for `text`.
///
/// Same look and the same copy behaviour as [`render_copy_page`], without
/// the hover effects and icons. This is the page embedded in data URLs, where
/// every byte counts against the QR capacity.
pub fn render_compact_copy_page(text: &str) -> String {
    assemble([COMPACT_HEAD, COMPACT_MIDDLE, COMPACT_TAIL], text)
}

fn assemble([head, middle, tail]: [&str; 3], text: &str) -> String {
    let display = escape_html(text);
    let literal = escape_js_string(text);
    let mut html =
        String::with_capacity(head.len() + display.len() + middle.len() + literal.len() + tail.len());
    html.push_str(head);
    html.push_str(&display);
    html.push_str(middle);
    html.push_str(&literal);
    html.push_str(tail);
    html
}

/// Escapes text for display inside an HTML element.
///
/// `<` and `>` become entities and each `\n` becomes `<br>`. Everything
/// else, `&` and `\r` included, is passed through as typed.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes text for use inside a double-quoted JavaScript string literal in
/// an inline `<script>`.
///
/// Backslash, double quote, newline and carriage return are escaped so the
/// literal cannot end early or span lines. `<` is written as `\x3C` so the
/// text can never close the script element, and U+2028/U+2029 are escaped
/// because older engines treat them as line terminators.
pub fn escape_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
