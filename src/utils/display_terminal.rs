//! 터미널 출력 포맷팅 유틸리티
//!
//! 시작 배너, 레지스트리 초기화 진행 상황, 인덱스 준비 결과를 터미널에 출력합니다.
//! 출력 문자열은 `format_*` 함수로 만들고 `print_*` 함수는 그대로 출력만 합니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태의 제목 문자열
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              🛒 SHOP BACKEND STARTING            ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn format_boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!(
        "╔{border}╗\n║{title:^width$}║\n╚{border}╝",
        border = border,
        title = title,
        width = BOX_WIDTH - 1,
    )
}

pub fn print_boxed_title(title: &str) {
    println!("{}", format_boxed_title(title));
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn format_sub_task(name: &str, status: &str) -> String {
    format!("   ├─ {}: {}", name, status)
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("{}", format_sub_task(name, status));
}

/// 레지스트리 초기화 요약
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} name cache: {} registrations", cache_type, count);
}

/// 시작 배너: 서비스 이름, 버전, 바인딩 주소, 실행 환경
pub fn print_startup_banner(version: &str, bind_address: &str, environment: &str) {
    print_boxed_title("🛒 SHOP BACKEND STARTING");
    println!("   🏷️  Version: {}", version);
    println!("   🌐 Bind: http://{}", bind_address);
    println!("   🧭 Environment: {}", environment);
    println!();
}

/// 컬렉션별 인덱스 준비 결과 (`ok == false`면 실패 표시)
pub fn print_index_report(results: &[(&str, bool)]) {
    print_step_start(3, "Ensuring MongoDB indexes");
    for (collection, ok) in results {
        print_sub_task(collection, if *ok { "✓ Ready" } else { "✗ Failed" });
    }
    let ready = results.iter().filter(|(_, ok)| *ok).count();
    print_step_complete(3, "Indexes ensured", ready);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_lines_share_width() {
        let boxed = format_boxed_title("INDEXES");
        let widths: Vec<usize> = boxed.lines().map(|l| l.chars().count()).collect();

        assert_eq!(widths.len(), 3);
        assert_eq!(widths[0], BOX_WIDTH + 2);
        assert_eq!(widths[1], BOX_WIDTH + 1);
        assert!(boxed.contains("INDEXES"));
    }

    #[test]
    fn test_sub_task_format() {
        assert_eq!(format_sub_task("carts", "✓ Ready"), "   ├─ carts: ✓ Ready");
    }
}
