//! Message catalogs.
//!
//! Rendering never hard-codes human-language words: every literal comes from
//! a [`TextProvider`]. Three catalogs ship with the crate, and any
//! `HashMap<String, String>` can stand in for a host-supplied one.

use std::collections::HashMap;
use std::fmt;

/// Maps message keys to localized templates and words.
///
/// Missing keys yield `""`; callers must tolerate empty substitutions.
pub trait TextProvider {
    fn get_text(&self, key: &str) -> &str;
}

impl<S: std::hash::BuildHasher> TextProvider for HashMap<String, String, S> {
    fn get_text(&self, key: &str) -> &str {
        self.get(key).map(String::as_str).unwrap_or("")
    }
}

impl<T: TextProvider + ?Sized> TextProvider for &T {
    fn get_text(&self, key: &str) -> &str {
        (**self).get_text(key)
    }
}

/// Substitute `{0}`, `{1}`, ... in `template` with `args`. Unknown indices
/// are left untouched.
pub fn fill(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        match tail[1..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

type Catalog = &'static [(&'static str, &'static str)];

fn lookup(catalog: Catalog, key: &str) -> &'static str {
    catalog
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

const ENGLISH_WORDS: Catalog = &[
    ("STARTING_ON", "starting on"),
    ("OCCURS_EVERYDAY", "Occurs everyday"),
    ("OCCURS_EVERY_N_DAYS", "Occurs every {0} days"),
    ("ONCE_OCCURRENCE", "Occurs once. Schedule will be used on {0} at {1}"),
    ("DATE_OVER_END", "Will not occur. Schedule will end on {0}"),
    ("NO_OCCURRENCE", "Will not occur again"),
    ("DAILY_OCCURRENCE", "Occurs the {0} of every {1} {2}"),
    ("RECURRING_OCCURENCE", "Occurs the {0} {1} of every {2} {3}"),
    ("OCCURRENCE_STR", "Occurs every {0} {1} on {2}"),
    ("OCCURRENCE_STR_RECURRING", "every {0} {1} between {2} and {3}"),
    ("OCCURRENCE_STR_ONCE", "once at {0}"),
    ("SECOND", "second"),
    ("SECONDS", "seconds"),
    ("MINUTE", "minute"),
    ("MINUTES", "minutes"),
    ("HOUR", "hour"),
    ("HOURS", "hours"),
    ("DAYS", "days"),
    ("WEEK", "week"),
    ("WEEKS", "weeks"),
    ("MONTH", "month"),
    ("MONTHS", "months"),
    ("ADDITION", "and"),
    ("FIRST", "first"),
    ("SECOND_ORDINAL", "second"),
    ("THIRD", "third"),
    ("FOURTH", "fourth"),
    ("LAST", "last"),
    ("MONDAY", "monday"),
    ("TUESDAY", "tuesday"),
    ("WEDNESDAY", "wednesday"),
    ("THURSDAY", "thursday"),
    ("FRIDAY", "friday"),
    ("SATURDAY", "saturday"),
    ("SUNDAY", "sunday"),
    ("DAY", "day"),
    ("WEEKDAY", "weekday"),
    ("WEEKEND_DAY", "weekend day"),
    ("INVALID_DATE", "The specified date is not valid"),
    ("INVALID_STARTDATE", "The specified start date is not valid"),
    ("INVALID_ENDDATE", "The specified end date is not valid"),
    ("END_DATE_AFTER_START", "The end date must come after the start date"),
    ("NO_ONCE_DATETIME", "Type \"Once\" was indicated, but not the date and time"),
    ("NO_FREQUENCY", "No frequency of execution was specified"),
    ("NO_DAILY_FREQUENCY", "No daily frequency was specified"),
    ("NO_WEEKLY_FREQUENCY", "No weekly frequency was specified"),
    ("NO_MONTHLY_FREQUENCY", "No monthly frequency was specified"),
    ("NO_VALID_WEEKDAY", "No valid day of the week was indicated"),
    ("INCORRECT_WEEKLY_FREQUENCY", "Incorrect weekly frequency"),
    ("INVALID_INTERVAL", "The specified monthly interval is invalid"),
    ("INVALID_DAY", "The specified day of execution is invalid"),
    ("NO_DAY_TYPE", "No day type was specified"),
    ("NO_ORDINAL", "No ordinal position was specified"),
    (
        "INVALID_DAILY_WINDOW",
        "The daily start time must come before the daily end time",
    ),
    (
        "INVALID_DAILY_STEP",
        "The daily recurrence step must be greater than zero",
    ),
    ("INVALID_DAILY_INTERVAL", "The specified daily interval is invalid"),
    ("INVALID_DOCUMENT", "The configuration document is not valid"),
];

const SPANISH_WORDS: Catalog = &[
    ("DATE_FORMAT", "%d/%m/%Y"),
    ("STARTING_ON", "empezando el"),
    ("OCCURS_EVERYDAY", "Ocurre todos los dias"),
    ("OCCURS_EVERY_N_DAYS", "Ocurre cada {0} dias"),
    (
        "ONCE_OCCURRENCE",
        "Ocurre una vez. La programacion se usará el {0} a las {1}",
    ),
    ("DATE_OVER_END", "No ocurrira. La programacion acabará el {0}"),
    ("NO_OCCURRENCE", "No volverá a ocurrir"),
    ("DAILY_OCCURRENCE", "Ocurre el {0} de cada {1} {2}"),
    ("RECURRING_OCCURENCE", "Ocurre el {0} {1} de cada {2} {3}"),
    ("OCCURRENCE_STR", "Ocurre cada {0} {1} el {2}"),
    (
        "OCCURRENCE_STR_RECURRING",
        "cada {0} {1} entre las {2} y las {3}",
    ),
    ("OCCURRENCE_STR_ONCE", "una vez a las {0}"),
    ("SECOND", "segundo"),
    ("SECONDS", "segundos"),
    ("MINUTE", "minuto"),
    ("MINUTES", "minutos"),
    ("HOUR", "hora"),
    ("HOURS", "horas"),
    ("DAYS", "dias"),
    ("WEEK", "semana"),
    ("WEEKS", "semanas"),
    ("MONTH", "mes"),
    ("MONTHS", "meses"),
    ("ADDITION", "y"),
    ("FIRST", "primer"),
    ("SECOND_ORDINAL", "segundo"),
    ("THIRD", "tercer"),
    ("FOURTH", "cuarto"),
    ("LAST", "último"),
    ("MONDAY", "lunes"),
    ("TUESDAY", "martes"),
    ("WEDNESDAY", "miércoles"),
    ("THURSDAY", "jueves"),
    ("FRIDAY", "viernes"),
    ("SATURDAY", "sábado"),
    ("SUNDAY", "domingo"),
    ("DAY", "dia"),
    ("WEEKDAY", "dia laborable"),
    ("WEEKEND_DAY", "dia de fin de semana"),
    ("INVALID_DATE", "La fecha especificada no es válida"),
    ("INVALID_STARTDATE", "La fecha de inicio especificada no es válida"),
    ("INVALID_ENDDATE", "La fecha de fin especificada no es válida"),
    (
        "END_DATE_AFTER_START",
        "La fecha de fin debe ser posterior a la fecha de inicio",
    ),
    (
        "NO_ONCE_DATETIME",
        "Se indicó el tipo \"Once\", pero no la fecha y hora",
    ),
    ("NO_FREQUENCY", "No se ha especificado frecuencia de ejecucion"),
    ("NO_DAILY_FREQUENCY", "No se ha especificado frecuencia diaria"),
    ("NO_WEEKLY_FREQUENCY", "No se ha especificado frecuencia semanal"),
    ("NO_MONTHLY_FREQUENCY", "No se ha especificado frecuencia mensual"),
    ("NO_VALID_WEEKDAY", "No se ha indicado un dia de la semana válido"),
    ("INCORRECT_WEEKLY_FREQUENCY", "Frecuencia semanal incorrecta"),
    ("INVALID_INTERVAL", "El intervalo mensual especificado no es válido"),
    ("INVALID_DAY", "El dia de ejecución especificado no es válido"),
    ("NO_DAY_TYPE", "No se ha especificado tipo de dia"),
    ("NO_ORDINAL", "No se ha especificado la posición ordinal"),
    (
        "INVALID_DAILY_WINDOW",
        "La hora de inicio diaria debe ser anterior a la hora de fin",
    ),
    (
        "INVALID_DAILY_STEP",
        "El paso de la recurrencia diaria debe ser mayor que cero",
    ),
    ("INVALID_DAILY_INTERVAL", "El intervalo diario especificado no es válido"),
    ("INVALID_DOCUMENT", "El documento de configuración no es válido"),
];

/// American English: month-first dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUs;

/// British English: day-first dates. Also the fallback catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUk;

/// Spanish (Spain).
#[derive(Debug, Clone, Copy, Default)]
pub struct EsEs;

impl TextProvider for EnUs {
    fn get_text(&self, key: &str) -> &str {
        match key {
            "DATE_FORMAT" => "%m/%d/%Y",
            _ => lookup(ENGLISH_WORDS, key),
        }
    }
}

impl TextProvider for EnUk {
    fn get_text(&self, key: &str) -> &str {
        match key {
            "DATE_FORMAT" => "%d/%m/%Y",
            _ => lookup(ENGLISH_WORDS, key),
        }
    }
}

impl TextProvider for EsEs {
    fn get_text(&self, key: &str) -> &str {
        lookup(SPANISH_WORDS, key)
    }
}

/// A bundled catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    EnUs,
    #[default]
    EnUk,
    EsEs,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::EnUs, Locale::EnUk, Locale::EsEs];

    /// Resolve a locale tag such as `"EN-US"` or `"es_es"`. Unknown tags fall
    /// back to [`Locale::EnUk`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().replace('_', "-").to_ascii_uppercase().as_str() {
            "EN-US" => Self::EnUs,
            "ES-ES" => Self::EsEs,
            _ => Self::EnUk,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "EN-US",
            Self::EnUk => "EN-UK",
            Self::EsEs => "ES-ES",
        }
    }

    pub fn provider(self) -> &'static dyn TextProvider {
        match self {
            Self::EnUs => &EnUs,
            Self::EnUk => &EnUk,
            Self::EsEs => &EsEs,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The bundled catalog for a locale tag.
pub fn text_provider_for(tag: &str) -> &'static dyn TextProvider {
    Locale::from_tag(tag).provider()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_positional_arguments() {
        assert_eq!(
            fill("every {0} {1} between {2} and {3}", &[&2, &"hours", &"00:00:00", &"12:00:00"]),
            "every 2 hours between 00:00:00 and 12:00:00"
        );
        assert_eq!(fill("{1}-{0}", &[&"a", &"b"]), "b-a");
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(fill("on {0} at {5}", &[&"x"]), "on x at {5}");
        assert_eq!(fill("open {brace", &[]), "open {brace");
        assert_eq!(fill("", &[&1]), "");
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::from_tag("EN-US"), Locale::EnUs);
        assert_eq!(Locale::from_tag("es_es"), Locale::EsEs);
        assert_eq!(Locale::from_tag(" en-uk "), Locale::EnUk);
        assert_eq!(Locale::from_tag("fr-FR"), Locale::EnUk);
        assert_eq!(Locale::EsEs.to_string(), "ES-ES");
        for locale in Locale::ALL {
            assert_eq!(Locale::from_tag(locale.tag()), locale);
        }
    }

    #[test]
    fn date_formats_differ_by_locale() {
        assert_eq!(EnUs.get_text("DATE_FORMAT"), "%m/%d/%Y");
        assert_eq!(EnUk.get_text("DATE_FORMAT"), "%d/%m/%Y");
        assert_eq!(text_provider_for("ES-ES").get_text("DATE_FORMAT"), "%d/%m/%Y");
    }

    #[test]
    fn missing_keys_are_empty() {
        assert_eq!(EnUk.get_text("NOT_A_KEY"), "");
        let mut custom = HashMap::new();
        custom.insert("ADDITION".to_string(), "et".to_string());
        assert_eq!(custom.get_text("ADDITION"), "et");
        assert_eq!(custom.get_text("WEEKS"), "");
    }

    #[test]
    fn bundled_catalogs_share_keys() {
        for (key, _) in ENGLISH_WORDS {
            assert!(!EsEs.get_text(key).is_empty(), "ES-ES is missing {key}");
        }
    }
}
