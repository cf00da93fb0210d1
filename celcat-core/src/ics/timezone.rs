//! Static timezone definitions.

/// One STANDARD or DAYLIGHT sub-component of a `VTIMEZONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observance {
    pub dtstart: &'static str,
    pub offset_from: &'static str,
    pub offset_to: &'static str,
    pub name: &'static str,
    pub rrule: &'static str,
}

/// A timezone with fixed transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneDef {
    pub tzid: &'static str,
    pub daylight: Observance,
    pub standard: Observance,
}

/// Central European time, as used by CELCAT exports from French universities.
pub const EUROPE_PARIS: TimezoneDef = TimezoneDef {
    tzid: "Europe/Paris",
    daylight: Observance {
        dtstart: "19810329T020000",
        offset_from: "+0100",
        offset_to: "+0200",
        name: "CEST",
        rrule: "FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU",
    },
    standard: Observance {
        dtstart: "19961027T030000",
        offset_from: "+0200",
        offset_to: "+0100",
        name: "CET",
        rrule: "FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU",
    },
};

impl TimezoneDef {
    /// Render the `VTIMEZONE` component, CRLF-terminated
    pub fn to_vtimezone(&self) -> String {
        let mut out = String::new();
        out.push_str("BEGIN:VTIMEZONE\r\n");
        out.push_str(&format!("TZID:{}\r\n", self.tzid));
        out.push_str(&format!("X-LIC-LOCATION:{}\r\n", self.tzid));
        self.daylight.write_to(&mut out, "DAYLIGHT");
        self.standard.write_to(&mut out, "STANDARD");
        out.push_str("END:VTIMEZONE\r\n");
        out
    }
}

impl Observance {
    fn write_to(&self, out: &mut String, kind: &str) {
        out.push_str(&format!("BEGIN:{kind}\r\n"));
        out.push_str(&format!("DTSTART:{}\r\n", self.dtstart));
        out.push_str(&format!("TZOFFSETFROM:{}\r\n", self.offset_from));
        out.push_str(&format!("TZOFFSETTO:{}\r\n", self.offset_to));
        out.push_str(&format!("TZNAME:{}\r\n", self.name));
        out.push_str(&format!("RRULE:{}\r\n", self.rrule));
        out.push_str(&format!("END:{kind}\r\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paris_vtimezone() {
        let block = EUROPE_PARIS.to_vtimezone();
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VTIMEZONE"));
        assert_eq!(lines.last(), Some(&"END:VTIMEZONE"));
        assert!(lines.contains(&"TZID:Europe/Paris"));
        assert!(lines.contains(&"TZNAME:CEST"));
        assert!(lines.contains(&"RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU"));

        let daylight = block.find("BEGIN:DAYLIGHT").unwrap();
        let standard = block.find("BEGIN:STANDARD").unwrap();
        assert!(daylight < standard, "DAYLIGHT should precede STANDARD:\n{block}");
    }
}
