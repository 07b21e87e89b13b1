//! HTML 뷰 모듈
//!
//! 로그인, 등록, 홈 화면을 렌더링합니다. 사용자나 프로바이더에서 온
//! 모든 값은 [`escape_html`](crate::utils::string_utils::escape_html) 을 거쳐 출력됩니다.

pub mod pages;

pub use pages::{home_page, login_page, register_page, LoginView};

use crate::utils::string_utils::escape_html;

/// 공통 레이아웃
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

/// 플래시 메시지 목록
fn flash_list(flashes: &[String]) -> String {
    if flashes.is_empty() {
        return String::new();
    }

    let items: String = flashes
        .iter()
        .map(|message| format!("<li>{}</li>", escape_html(message)))
        .collect();
    format!(r#"<ul class="flash">{}</ul>"#, items)
}

/// CSRF 토큰 hidden 필드
fn csrf_field(csrf_token: &str) -> String {
    format!(
        r#"<input type="hidden" name="_csrf" value="{}">"#,
        escape_html(csrf_token)
    )
}
