use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ValidationDetail;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("Invalid academic year regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time regex"));

/// 密码中允许的特殊字符
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_academic_year(year: &str) -> Result<(), &'static str> {
    if !ACADEMIC_YEAR_RE.is_match(year) {
        return Err("Academic year must be in format YYYY-YY");
    }
    Ok(())
}

/// 校验 "HH:MM" 格式的时间
pub fn validate_time(time: &str) -> Result<(), &'static str> {
    if !TIME_RE.is_match(time) {
        return Err("Time must be in format HH:MM");
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

    /// 转为响应中的 details 字段
    pub fn details(&self, field: &str) -> Vec<ValidationDetail> {
        self.errors
            .iter()
            .map(|msg| ValidationDetail::new(field, *msg))
            .collect()
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 必须包含：`@$!%*?&` 中的特殊字符
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        errors.push("Password must contain at least one special character (@$!%*?&)");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 班级字段校验，返回所有不合法字段
pub fn validate_class_fields(
    name: Option<&str>,
    section: Option<&str>,
    academic_year: Option<&str>,
    max_students: Option<i32>,
) -> Vec<ValidationDetail> {
    let mut details = Vec::new();

    if let Some(name) = name {
        let len = name.trim().chars().count();
        if len == 0 || len > 50 {
            details.push(ValidationDetail::new(
                "name",
                "Class name must be between 1 and 50 characters",
            ));
        }
    }
    if let Some(section) = section {
        let len = section.trim().chars().count();
        if len == 0 || len > 10 {
            details.push(ValidationDetail::new(
                "section",
                "Section must be between 1 and 10 characters",
            ));
        }
    }
    if let Some(year) = academic_year
        && let Err(msg) = validate_academic_year(year)
    {
        details.push(ValidationDetail::new("academicYear", msg));
    }
    if let Some(max) = max_students
        && !(1..=100).contains(&max)
    {
        details.push(ValidationDetail::new(
            "maxStudents",
            "Max students must be between 1 and 100",
        ));
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
    }

    #[test]
    fn test_missing_special_char() {
        let result = validate_password("SecurePass123");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1@");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_weak_password_collects_every_error() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 4);
        let details = result.details("password");
        assert!(details.iter().all(|d| d.field == "password"));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("admin@greenwood.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2024-25").is_ok());
        assert!(validate_academic_year("2024-2025").is_err());
        assert!(validate_academic_year("24-25").is_err());
    }

    #[test]
    fn test_time() {
        assert!(validate_time("08:30").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("8:30").is_err());
    }

    #[test]
    fn test_class_fields() {
        assert!(validate_class_fields(Some("10"), Some("A"), Some("2024-25"), Some(40)).is_empty());

        let details = validate_class_fields(Some(""), Some("ABCDEFGHIJK"), Some("2024"), Some(0));
        let fields: Vec<_> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "section", "academicYear", "maxStudents"]);
    }
}
