use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{4}$").expect("Invalid academic year regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 学年格式："2025-2026"，且后一年 = 前一年 + 1
pub fn validate_academic_year(academic_year: &str) -> Result<(), &'static str> {
    if !ACADEMIC_YEAR_RE.is_match(academic_year) {
        return Err("Academic year must be in YYYY-YYYY format");
    }
    let (start, end) = academic_year.split_at(4);
    let start: i32 = start.parse().map_err(|_| "Invalid academic year")?;
    let end: i32 = end[1..].parse().map_err(|_| "Invalid academic year")?;
    if end != start + 1 {
        return Err("Academic year must span consecutive years");
    }
    Ok(())
}

/// 成绩范围校验：0 ≤ marks ≤ max_marks
pub fn validate_marks_range(marks_obtained: f64, max_marks: i32) -> Result<(), String> {
    if max_marks <= 0 {
        return Err("Exam max_marks must be positive".to_string());
    }
    if marks_obtained < 0.0 {
        return Err("Marks obtained cannot be negative".to_string());
    }
    if marks_obtained > max_marks as f64 {
        return Err(format!(
            "Marks obtained {marks_obtained} exceeds max marks {max_marks}"
        ));
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
    ];
    let lower = password.to_lowercase();
    if weak_passwords.iter().any(|weak| lower.contains(weak)) {
        errors.push("Password is too common");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("teacher01").is_ok());
        assert!(validate_username("abc").is_err()); // 太短
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("principal@school.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_validate_academic_year() {
        assert!(validate_academic_year("2025-2026").is_ok());
        assert!(validate_academic_year("2025-2027").is_err());
        assert!(validate_academic_year("25-26").is_err());
    }

    #[test]
    fn test_validate_marks_range() {
        assert!(validate_marks_range(45.0, 50).is_ok());
        assert!(validate_marks_range(0.0, 50).is_ok());
        assert!(validate_marks_range(50.0, 50).is_ok());
        assert!(validate_marks_range(-1.0, 50).is_err());
        assert!(validate_marks_range(51.0, 50).is_err());
        assert!(validate_marks_range(10.0, 0).is_err());
    }

    #[test]
    fn test_validate_password_policy() {
        assert!(validate_password("Abcdef12").is_valid);
        assert!(!validate_password("short1A").is_valid);
        assert!(!validate_password("alllowercase1").is_valid);
        assert!(!validate_password("Password123").is_valid); // 弱密码
    }
}
