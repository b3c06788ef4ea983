use rand::Rng;
use rand::seq::SliceRandom;

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SPECIAL: &[u8] = b"@$!%*?&";

/// 生成满足密码策略的临时密码
///
/// 每类字符至少出现一次，最短 8 位。
pub fn generate_temporary_password(length: usize) -> String {
    let length = length.max(8);
    let mut rng = rand::rng();
    let pools = [LOWER, UPPER, DIGITS, SPECIAL];

    let mut chars: Vec<u8> = pools
        .iter()
        .map(|pool| pool[rng.random_range(0..pool.len())])
        .collect();

    let all: Vec<u8> = pools.concat();
    while chars.len() < length {
        chars.push(all[rng.random_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    String::from_utf8(chars).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_temporary_password_meets_policy() {
        for _ in 0..50 {
            let password = generate_temporary_password(12);
            assert_eq!(password.len(), 12);
            assert!(validate_password(&password).is_valid, "{password}");
        }
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(generate_temporary_password(3).len(), 8);
    }
}
