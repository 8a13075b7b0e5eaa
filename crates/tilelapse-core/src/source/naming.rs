use chrono::NaiveDateTime;

const DATE_LEN: usize = 8;
const TIME_LEN: usize = 6;

/// The `YYYYMMDD` / `HHMMSS` pair embedded in a snapshot filename
/// `<prefix>_<YYYYMMDD>_<HHMMSS>.<ext>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotStamp {
    date: String,
    time: String,
}

impl SnapshotStamp {
    pub fn from_datetime(datetime: &NaiveDateTime) -> Self {
        Self {
            date: datetime.format("%Y%m%d").to_string(),
            time: datetime.format("%H%M%S").to_string(),
        }
    }

    /// Parse a bare file name. Returns `None` unless the stem ends in
    /// `_<8 digits>_<6 digits>` preceded by a non-empty prefix.
    pub fn parse_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _ext)| stem);

        let mut parts = stem.rsplitn(3, '_');
        let time = parts.next()?;
        let date = parts.next()?;
        let prefix = parts.next()?;

        if prefix.is_empty() || !is_digits(date, DATE_LEN) || !is_digits(time, TIME_LEN) {
            return None;
        }

        Some(Self {
            date: date.to_string(),
            time: time.to_string(),
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Lexicographic order of this key is chronological order.
    pub fn sort_key(&self) -> String {
        format!("{}_{}", self.date, self.time)
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn display(&self) -> String {
        let d = &self.date;
        let t = &self.time;
        format!(
            "{}-{}-{} {}:{}:{}",
            &d[0..4],
            &d[4..6],
            &d[6..8],
            &t[0..2],
            &t[2..4],
            &t[4..6]
        )
    }

    pub fn file_name(&self, prefix: &str, extension: &str) -> String {
        format!("{prefix}_{}_{}.{extension}", self.date, self.time)
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
