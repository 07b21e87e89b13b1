//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 시작 요약을 출력합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               OAuth Login Service                ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    // 박스 내부 고정 너비 50칸
    let content_width = 50;
    let border = "═".repeat(content_width);

    format!("╔{}╗\n║{:^50}║\n╚{}╝", border, title, border)
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: 사용자 저장소 연결
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 3: OAuth 프로바이더 (2 configured)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} configured)", step, description, count);
}

/// 하위 항목의 상태를 트리 형태로 표시합니다
///
/// ```text
///    ├─ user store: mongodb
///    ├─ github: enabled
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 서버 시작 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                 🚀 SERVER READY                  ║
/// ╚══════════════════════════════════════════════════╝
///    🌐 Address: http://0.0.0.0:3000
///    📦 User store: mongodb
///    🔑 OAuth providers: github, kakao
/// ```
pub fn print_startup_summary(address: &str, store: &str, providers: &[&str]) {
    println!();
    print_boxed_title("🚀 SERVER READY");
    println!("   🌐 Address: http://{}", address);
    println!("   📦 User store: {}", store);
    println!("   🔑 OAuth providers: {}", provider_list(providers));
    println!();
}

fn provider_list(providers: &[&str]) -> String {
    if providers.is_empty() {
        "(none, local login only)".to_string()
    } else {
        providers.join(", ")
    }
}
