// Country reference table
// ISO 3166-1 alpha-2 codes with display names per supported language.

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    fr: &'static str,
    en: &'static str,
    de: &'static str,
    it: &'static str,
}

impl Country {
    pub fn name(&self, lang: Language) -> &'static str {
        match lang {
            Language::Fr => self.fr,
            Language::En => self.en,
            Language::De => self.de,
            Language::It => self.it,
        }
    }
}

const fn c(
    code: &'static str,
    fr: &'static str,
    en: &'static str,
    de: &'static str,
    it: &'static str,
) -> Country {
    Country {
        code,
        fr,
        en,
        de,
        it,
    }
}

pub const COUNTRIES: &[Country] = &[
    c("AR", "Argentine", "Argentina", "Argentinien", "Argentina"),
    c("AU", "Australie", "Australia", "Australien", "Australia"),
    c("AT", "Autriche", "Austria", "Österreich", "Austria"),
    c("BD", "Bangladesh", "Bangladesh", "Bangladesch", "Bangladesh"),
    c("BE", "Belgique", "Belgium", "Belgien", "Belgio"),
    c("BJ", "Bénin", "Benin", "Benin", "Benin"),
    c("BO", "Bolivie", "Bolivia", "Bolivien", "Bolivia"),
    c("BR", "Brésil", "Brazil", "Brasilien", "Brasile"),
    c("BF", "Burkina Faso", "Burkina Faso", "Burkina Faso", "Burkina Faso"),
    c("KH", "Cambodge", "Cambodia", "Kambodscha", "Cambogia"),
    c("CM", "Cameroun", "Cameroon", "Kamerun", "Camerun"),
    c("CA", "Canada", "Canada", "Kanada", "Canada"),
    c("CL", "Chili", "Chile", "Chile", "Cile"),
    c("CN", "Chine", "China", "China", "Cina"),
    c("CO", "Colombie", "Colombia", "Kolumbien", "Colombia"),
    c("CR", "Costa Rica", "Costa Rica", "Costa Rica", "Costa Rica"),
    c("CI", "Côte d'Ivoire", "Côte d'Ivoire", "Elfenbeinküste", "Costa d'Avorio"),
    c("CU", "Cuba", "Cuba", "Kuba", "Cuba"),
    c("CD", "République démocratique du Congo", "Democratic Republic of the Congo", "Demokratische Republik Kongo", "Repubblica Democratica del Congo"),
    c("DK", "Danemark", "Denmark", "Dänemark", "Danimarca"),
    c("DO", "République dominicaine", "Dominican Republic", "Dominikanische Republik", "Repubblica Dominicana"),
    c("EC", "Équateur", "Ecuador", "Ecuador", "Ecuador"),
    c("EG", "Égypte", "Egypt", "Ägypten", "Egitto"),
    c("ES", "Espagne", "Spain", "Spanien", "Spagna"),
    c("ET", "Éthiopie", "Ethiopia", "Äthiopien", "Etiopia"),
    c("FR", "France", "France", "Frankreich", "Francia"),
    c("GA", "Gabon", "Gabon", "Gabun", "Gabon"),
    c("DE", "Allemagne", "Germany", "Deutschland", "Germania"),
    c("GH", "Ghana", "Ghana", "Ghana", "Ghana"),
    c("GR", "Grèce", "Greece", "Griechenland", "Grecia"),
    c("GT", "Guatemala", "Guatemala", "Guatemala", "Guatemala"),
    c("GN", "Guinée", "Guinea", "Guinea", "Guinea"),
    c("GF", "Guyane française", "French Guiana", "Französisch-Guayana", "Guyana francese"),
    c("HT", "Haïti", "Haiti", "Haiti", "Haiti"),
    c("IN", "Inde", "India", "Indien", "India"),
    c("ID", "Indonésie", "Indonesia", "Indonesien", "Indonesia"),
    c("IT", "Italie", "Italy", "Italien", "Italia"),
    c("JP", "Japon", "Japan", "Japan", "Giappone"),
    c("JO", "Jordanie", "Jordan", "Jordanien", "Giordania"),
    c("KE", "Kenya", "Kenya", "Kenia", "Kenya"),
    c("LA", "Laos", "Laos", "Laos", "Laos"),
    c("MG", "Madagascar", "Madagascar", "Madagaskar", "Madagascar"),
    c("MY", "Malaisie", "Malaysia", "Malaysia", "Malesia"),
    c("ML", "Mali", "Mali", "Mali", "Mali"),
    c("MA", "Maroc", "Morocco", "Marokko", "Marocco"),
    c("MX", "Mexique", "Mexico", "Mexiko", "Messico"),
    c("MZ", "Mozambique", "Mozambique", "Mosambik", "Mozambico"),
    c("MM", "Myanmar", "Myanmar", "Myanmar", "Myanmar"),
    c("NA", "Namibie", "Namibia", "Namibia", "Namibia"),
    c("NP", "Népal", "Nepal", "Nepal", "Nepal"),
    c("NI", "Nicaragua", "Nicaragua", "Nicaragua", "Nicaragua"),
    c("NE", "Niger", "Niger", "Niger", "Niger"),
    c("NG", "Nigeria", "Nigeria", "Nigeria", "Nigeria"),
    c("NL", "Pays-Bas", "Netherlands", "Niederlande", "Paesi Bassi"),
    c("PK", "Pakistan", "Pakistan", "Pakistan", "Pakistan"),
    c("PA", "Panama", "Panama", "Panama", "Panama"),
    c("PG", "Papouasie-Nouvelle-Guinée", "Papua New Guinea", "Papua-Neuguinea", "Papua Nuova Guinea"),
    c("PY", "Paraguay", "Paraguay", "Paraguay", "Paraguay"),
    c("PE", "Pérou", "Peru", "Peru", "Perù"),
    c("PH", "Philippines", "Philippines", "Philippinen", "Filippine"),
    c("PT", "Portugal", "Portugal", "Portugal", "Portogallo"),
    c("RW", "Rwanda", "Rwanda", "Ruanda", "Ruanda"),
    c("SA", "Arabie saoudite", "Saudi Arabia", "Saudi-Arabien", "Arabia Saudita"),
    c("SN", "Sénégal", "Senegal", "Senegal", "Senegal"),
    c("SG", "Singapour", "Singapore", "Singapur", "Singapore"),
    c("ZA", "Afrique du Sud", "South Africa", "Südafrika", "Sudafrica"),
    c("LK", "Sri Lanka", "Sri Lanka", "Sri Lanka", "Sri Lanka"),
    c("SE", "Suède", "Sweden", "Schweden", "Svezia"),
    c("CH", "Suisse", "Switzerland", "Schweiz", "Svizzera"),
    c("TZ", "Tanzanie", "Tanzania", "Tansania", "Tanzania"),
    c("TH", "Thaïlande", "Thailand", "Thailand", "Thailandia"),
    c("TG", "Togo", "Togo", "Togo", "Togo"),
    c("TN", "Tunisie", "Tunisia", "Tunesien", "Tunisia"),
    c("TR", "Turquie", "Turkey", "Türkei", "Turchia"),
    c("UG", "Ouganda", "Uganda", "Uganda", "Uganda"),
    c("GB", "Royaume-Uni", "United Kingdom", "Vereinigtes Königreich", "Regno Unito"),
    c("US", "États-Unis", "United States", "Vereinigte Staaten", "Stati Uniti"),
    c("VE", "Venezuela", "Venezuela", "Venezuela", "Venezuela"),
    c("VN", "Viêt Nam", "Vietnam", "Vietnam", "Vietnam"),
    c("ZM", "Zambie", "Zambia", "Sambia", "Zambia"),
    c("ZW", "Zimbabwe", "Zimbabwe", "Simbabwe", "Zimbabwe"),
];

pub fn by_code(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Localized country name, or the raw code when unknown.
pub fn display_name(code: &str, lang: Language) -> String {
    by_code(code)
        .map(|c| c.name(lang).to_string())
        .unwrap_or_else(|| code.to_string())
}
