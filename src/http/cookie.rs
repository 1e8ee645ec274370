use std::fmt;

/// A single `name=value` pair from a `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Cookies sent with one request. Names are unique; if the client repeats a
/// name, the last occurrence wins and keeps the first one's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    entries: Vec<Cookie>,
}

impl Cookies {
    /// Parses a `Cookie` header value such as `a=1; b=2`.
    ///
    /// Pairs without `=` or with an empty name are skipped.
    pub fn parse(header: &str) -> Self {
        let mut cookies = Self::default();

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies.insert(name, value.trim());
        }

        cookies
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|c| c.name.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.value = value.to_string(),
            None => self.entries.push(Cookie {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Looks up a cookie value by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cookie> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
