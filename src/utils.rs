/*!
 * Utility functions for overview
 */

use std::ffi::CStr;

use once_cell::sync::Lazy;

/// Default patterns to ignore: hidden entries, dunder names, virtualenvs and caches
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec![".*", "__*__", "venv", "env", "__pycache__"]);

/// Format a count with human-readable units
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Render a raw `st_mode` as a symbolic string like `ls -l` does
pub fn format_mode(mode: u32) -> String {
    const S_IFMT: u32 = 0o170000;

    let kind = match mode & S_IFMT {
        0o040000 => 'd',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);

    // (read, write, execute, special bit, char when special+exec, char when special only)
    let triplets = [
        (0o400, 0o200, 0o100, 0o4000, 's', 'S'),
        (0o040, 0o020, 0o010, 0o2000, 's', 'S'),
        (0o004, 0o002, 0o001, 0o1000, 't', 'T'),
    ];

    for (r, w, x, special, both, special_only) in triplets {
        out.push(if mode & r != 0 { 'r' } else { '-' });
        out.push(if mode & w != 0 { 'w' } else { '-' });
        let exec = mode & x != 0;
        out.push(match (mode & special != 0, exec) {
            (true, true) => both,
            (true, false) => special_only,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}

/// Resolve a numeric uid to a user name, falling back to the number itself
pub fn owner_name(uid: u32) -> String {
    lookup_user(uid).unwrap_or_else(|| uid.to_string())
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; 1024];

    loop {
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        let rc = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };

        if rc == libc::ERANGE && buf.len() < 1 << 16 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }

        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }

        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mode_common_cases() {
        assert_eq!(format_mode(0o040755), "drwxr-xr-x");
        assert_eq!(format_mode(0o100644), "-rw-r--r--");
        assert_eq!(format_mode(0o100600), "-rw-------");
        assert_eq!(format_mode(0o120777), "lrwxrwxrwx");
    }

    #[test]
    fn test_format_mode_special_bits() {
        assert_eq!(format_mode(0o104755), "-rwsr-xr-x");
        assert_eq!(format_mode(0o104644), "-rwSr--r--");
        assert_eq!(format_mode(0o102755), "-rwxr-sr-x");
        assert_eq!(format_mode(0o041777), "drwxrwxrwt");
        assert_eq!(format_mode(0o041776), "drwxrwxrwT");
    }

    #[test]
    fn test_format_mode_other_kinds() {
        assert_eq!(format_mode(0o010644).chars().next(), Some('p'));
        assert_eq!(format_mode(0o020666).chars().next(), Some('c'));
        assert_eq!(format_mode(0o060660).chars().next(), Some('b'));
        assert_eq!(format_mode(0o140755).chars().next(), Some('s'));
    }

    #[test]
    fn test_owner_name_root() {
        assert_eq!(owner_name(0), "root");
    }

    #[test]
    fn test_owner_name_unknown_uid_falls_back_to_number() {
        assert_eq!(owner_name(4_000_000_000), "4000000000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_000_000), "2.0M");
    }
}
