//! Approximate country centroids for placing location markers.

/// (country name, ISO 3166-1 alpha-2, alpha-3, latitude, longitude)
const CENTROIDS: &[(&str, &str, &str, f64, f64)] = &[
    ("Algeria", "DZ", "DZA", 28.0, 1.7),
    ("American Samoa", "AS", "ASM", -14.3, -170.7),
    ("Andorra", "AD", "AND", 42.5, 1.5),
    ("Argentina", "AR", "ARG", -38.4, -63.6),
    ("Armenia", "AM", "ARM", 40.1, 45.0),
    ("Australia", "AU", "AUS", -25.3, 133.8),
    ("Austria", "AT", "AUT", 47.5, 14.6),
    ("Bahamas", "BS", "BHS", 25.0, -77.4),
    ("Belgium", "BE", "BEL", 50.5, 4.5),
    ("Bolivia", "BO", "BOL", -16.3, -63.6),
    ("Bosnia and Herzegovina", "BA", "BIH", 43.9, 17.7),
    ("Brazil", "BR", "BRA", -14.2, -51.9),
    ("Canada", "CA", "CAN", 56.1, -106.3),
    ("Central African Republic", "CF", "CAF", 6.6, 20.9),
    ("Chile", "CL", "CHL", -35.7, -71.5),
    ("China", "CN", "CHN", 35.9, 104.2),
    ("Colombia", "CO", "COL", 4.6, -74.3),
    ("Costa Rica", "CR", "CRI", 9.7, -83.8),
    ("Croatia", "HR", "HRV", 45.1, 15.2),
    ("Cyprus", "CY", "CYP", 35.1, 33.4),
    ("Czech Republic", "CZ", "CZE", 49.8, 15.5),
    ("Denmark", "DK", "DNK", 56.3, 9.5),
    ("Ecuador", "EC", "ECU", -1.8, -78.2),
    ("Egypt", "EG", "EGY", 26.8, 30.8),
    ("Estonia", "EE", "EST", 58.6, 25.0),
    ("Finland", "FI", "FIN", 61.9, 25.7),
    ("France", "FR", "FRA", 46.2, 2.2),
    ("Germany", "DE", "DEU", 51.2, 10.5),
    ("Ghana", "GH", "GHA", 7.9, -1.0),
    ("Gibraltar", "GI", "GIB", 36.1, -5.4),
    ("Greece", "GR", "GRC", 39.1, 21.8),
    ("Honduras", "HN", "HND", 15.2, -86.2),
    ("Hong Kong", "HK", "HKG", 22.4, 114.1),
    ("Hungary", "HU", "HUN", 47.2, 19.5),
    ("India", "IN", "IND", 20.6, 79.0),
    ("Indonesia", "ID", "IDN", -0.8, 113.9),
    ("Iran", "IR", "IRN", 32.4, 53.7),
    ("Iraq", "IQ", "IRQ", 33.2, 43.7),
    ("Ireland", "IE", "IRL", 53.4, -8.2),
    ("Israel", "IL", "ISR", 31.0, 34.9),
    ("Italy", "IT", "ITA", 41.9, 12.6),
    ("Japan", "JP", "JPN", 36.2, 138.3),
    ("Kenya", "KE", "KEN", -0.02, 37.9),
    ("Latvia", "LV", "LVA", 56.9, 24.6),
    ("Lithuania", "LT", "LTU", 55.2, 23.9),
    ("Luxembourg", "LU", "LUX", 49.8, 6.1),
    ("Malaysia", "MY", "MYS", 4.2, 101.9),
    ("Malta", "MT", "MLT", 35.9, 14.4),
    ("Mauritius", "MU", "MUS", -20.3, 57.6),
    ("Mexico", "MX", "MEX", 23.6, -102.6),
    ("Moldova", "MD", "MDA", 47.4, 28.4),
    ("Netherlands", "NL", "NLD", 52.1, 5.3),
    ("New Zealand", "NZ", "NZL", -40.9, 174.9),
    ("Nigeria", "NG", "NGA", 9.1, 8.7),
    ("Pakistan", "PK", "PAK", 30.4, 69.3),
    ("Peru", "PE", "PER", -9.2, -75.0),
    ("Philippines", "PH", "PHL", 12.9, 121.8),
    ("Poland", "PL", "POL", 51.9, 19.1),
    ("Portugal", "PT", "PRT", 39.4, -8.2),
    ("Puerto Rico", "PR", "PRI", 18.2, -66.6),
    ("Qatar", "QA", "QAT", 25.4, 51.2),
    ("Romania", "RO", "ROU", 45.9, 25.0),
    ("Russia", "RU", "RUS", 61.5, 105.3),
    ("Saudi Arabia", "SA", "SAU", 23.9, 45.1),
    ("Serbia", "RS", "SRB", 44.0, 21.0),
    ("Singapore", "SG", "SGP", 1.4, 103.8),
    ("Slovenia", "SI", "SVN", 46.2, 15.0),
    ("South Africa", "ZA", "ZAF", -30.6, 22.9),
    ("South Korea", "KR", "KOR", 35.9, 127.8),
    ("Spain", "ES", "ESP", 40.5, -3.7),
    ("Sweden", "SE", "SWE", 60.1, 18.6),
    ("Switzerland", "CH", "CHE", 46.8, 8.2),
    ("Thailand", "TH", "THA", 15.9, 100.99),
    ("Tunisia", "TN", "TUN", 33.9, 9.5),
    ("Turkey", "TR", "TUR", 39.0, 35.2),
    ("Ukraine", "UA", "UKR", 48.4, 31.2),
    ("United Arab Emirates", "AE", "ARE", 23.4, 53.8),
    ("United Kingdom", "GB", "GBR", 55.4, -3.4),
    ("United States", "US", "USA", 37.1, -95.7),
    ("Uzbekistan", "UZ", "UZB", 41.4, 64.6),
    ("Vietnam", "VN", "VNM", 14.1, 108.3),
];

/// `(latitude, longitude)` for a country name, alpha-2 or alpha-3 code.
pub fn locate(location: &str) -> Option<(f64, f64)> {
    let location = location.trim();
    CENTROIDS
        .iter()
        .find(|(name, alpha2, alpha3, _, _)| {
            [name, alpha2, alpha3]
                .iter()
                .any(|key| key.eq_ignore_ascii_case(location))
        })
        .map(|&(_, _, _, lat, lon)| (lat, lon))
}
