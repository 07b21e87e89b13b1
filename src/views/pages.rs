use crate::config::AuthProvider;
use crate::domain::dto::users::response::UserResponse;
use crate::utils::string_utils::escape_html;
use crate::views::{csrf_field, flash_list, layout};

/// 로그인 페이지 렌더링 입력
pub struct LoginView<'a> {
    pub flashes: &'a [String],
    pub csrf_token: &'a str,
    /// 설정된 OAuth 프로바이더 (표시 순서대로)
    pub providers: &'a [AuthProvider],
}

/// `GET /login`
pub fn login_page(view: &LoginView<'_>) -> String {
    let provider_links: String = view
        .providers
        .iter()
        .map(|provider| {
            format!(
                r#"<li><a href="/auth/{}">{}(으)로 로그인</a></li>"#,
                provider.as_str(),
                escape_html(provider.display_name())
            )
        })
        .collect();

    let oauth_section = if provider_links.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="providers">{}</ul>"#, provider_links)
    };

    let body = format!(
        r#"<h1>로그인</h1>
{flashes}
<form method="post" action="/auth/local">
{csrf}
<label>아이디 <input type="text" name="login_id" required maxlength="64"></label>
<label>비밀번호 <input type="password" name="password" required></label>
<button type="submit">로그인</button>
</form>
{oauth}
<p><a href="/register">계정 만들기</a></p>"#,
        flashes = flash_list(view.flashes),
        csrf = csrf_field(view.csrf_token),
        oauth = oauth_section,
    );

    layout("로그인", &body)
}

/// `GET /register`
pub fn register_page(flashes: &[String], csrf_token: &str) -> String {
    let body = format!(
        r#"<h1>계정 만들기</h1>
{flashes}
<form method="post" action="/register">
{csrf}
<label>아이디 <input type="text" name="login_id" required maxlength="64"></label>
<label>비밀번호 <input type="password" name="password" required minlength="4"></label>
<label>표시 이름 <input type="text" name="user_name" maxlength="64"></label>
<button type="submit">등록</button>
</form>
<p><a href="/login">로그인으로 돌아가기</a></p>"#,
        flashes = flash_list(flashes),
        csrf = csrf_field(csrf_token),
    );

    layout("계정 만들기", &body)
}

/// `GET /` (로그인 필요)
pub fn home_page(user: &UserResponse, flashes: &[String], csrf_token: &str) -> String {
    let avatar = user
        .avatar_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img class="avatar" src="{}" alt="" width="64" height="64">"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1>환영합니다, {name}님</h1>
{flashes}
{avatar}
<dl>
<dt>로그인 방식</dt><dd>{provider}</dd>
<dt>아이디</dt><dd>{subject}</dd>
</dl>
<form method="post" action="/logout">
{csrf}
<button type="submit">로그아웃</button>
</form>"#,
        name = escape_html(&user.display_name),
        flashes = flash_list(flashes),
        avatar = avatar,
        provider = escape_html(user.provider.display_name()),
        subject = escape_html(&user.provider_user_id),
        csrf = csrf_field(csrf_token),
    );

    layout("홈", &body)
}
