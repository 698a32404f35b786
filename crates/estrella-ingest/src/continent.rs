/// Country-code to continent resolution.
///
/// The pipeline only needs a two-letter continent code per ISO-3 country
/// code; the shipped table covers the ISO 3166-1 alpha-3 set. Codes that
/// fall outside it are handled by the engine's special cases or surface as
/// an error.
pub trait ContinentLookup {
    fn continent_code(&self, iso3: &str) -> Option<&'static str>;
}

/// Fixed continent code -> display name map. `OC` deliberately renders as
/// "Australia" to match the reference dataset.
pub fn continent_name(code: &str) -> Option<&'static str> {
    match code {
        "NA" => Some("North America"),
        "SA" => Some("South America"),
        "AS" => Some("Asia"),
        "OC" => Some("Australia"),
        "AF" => Some("Africa"),
        "EU" => Some("Europe"),
        _ => None,
    }
}

/// Static ISO 3166-1 alpha-3 reference table.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoContinentTable;

impl ContinentLookup for IsoContinentTable {
    fn continent_code(&self, iso3: &str) -> Option<&'static str> {
        ISO3_CONTINENTS
            .binary_search_by_key(&iso3, |(code, _)| code)
            .ok()
            .map(|index| ISO3_CONTINENTS[index].1)
    }
}

/// Sorted by alpha-3 code for binary search.
const ISO3_CONTINENTS: &[(&str, &str)] = &[
    ("ABW", "NA"),
    ("AFG", "AS"),
    ("AGO", "AF"),
    ("AIA", "NA"),
    ("ALB", "EU"),
    ("AND", "EU"),
    ("ARE", "AS"),
    ("ARG", "SA"),
    ("ARM", "AS"),
    ("ATG", "NA"),
    ("AUS", "OC"),
    ("AUT", "EU"),
    ("AZE", "AS"),
    ("BDI", "AF"),
    ("BEL", "EU"),
    ("BEN", "AF"),
    ("BFA", "AF"),
    ("BGD", "AS"),
    ("BGR", "EU"),
    ("BHR", "AS"),
    ("BHS", "NA"),
    ("BIH", "EU"),
    ("BLR", "EU"),
    ("BLZ", "NA"),
    ("BMU", "NA"),
    ("BOL", "SA"),
    ("BRA", "SA"),
    ("BRB", "NA"),
    ("BRN", "AS"),
    ("BTN", "AS"),
    ("BWA", "AF"),
    ("CAF", "AF"),
    ("CAN", "NA"),
    ("CHE", "EU"),
    ("CHL", "SA"),
    ("CHN", "AS"),
    ("CIV", "AF"),
    ("CMR", "AF"),
    ("COD", "AF"),
    ("COG", "AF"),
    ("COL", "SA"),
    ("COM", "AF"),
    ("CPV", "AF"),
    ("CRI", "NA"),
    ("CUB", "NA"),
    ("CUW", "NA"),
    ("CYM", "NA"),
    ("CYP", "AS"),
    ("CZE", "EU"),
    ("DEU", "EU"),
    ("DJI", "AF"),
    ("DMA", "NA"),
    ("DNK", "EU"),
    ("DOM", "NA"),
    ("DZA", "AF"),
    ("ECU", "SA"),
    ("EGY", "AF"),
    ("ERI", "AF"),
    ("ESP", "EU"),
    ("EST", "EU"),
    ("ETH", "AF"),
    ("FIN", "EU"),
    ("FJI", "OC"),
    ("FRA", "EU"),
    ("GAB", "AF"),
    ("GBR", "EU"),
    ("GEO", "AS"),
    ("GHA", "AF"),
    ("GIN", "AF"),
    ("GMB", "AF"),
    ("GNB", "AF"),
    ("GNQ", "AF"),
    ("GRC", "EU"),
    ("GRD", "NA"),
    ("GTM", "NA"),
    ("GUF", "SA"),
    ("GUY", "SA"),
    ("HKG", "AS"),
    ("HND", "NA"),
    ("HRV", "EU"),
    ("HTI", "NA"),
    ("HUN", "EU"),
    ("IDN", "AS"),
    ("IND", "AS"),
    ("IRL", "EU"),
    ("IRN", "AS"),
    ("IRQ", "AS"),
    ("ISL", "EU"),
    ("ISR", "AS"),
    ("ITA", "EU"),
    ("JAM", "NA"),
    ("JOR", "AS"),
    ("JPN", "AS"),
    ("KAZ", "AS"),
    ("KEN", "AF"),
    ("KGZ", "AS"),
    ("KHM", "AS"),
    ("KOR", "AS"),
    ("KWT", "AS"),
    ("LAO", "AS"),
    ("LBN", "AS"),
    ("LBR", "AF"),
    ("LBY", "AF"),
    ("LCA", "NA"),
    ("LIE", "EU"),
    ("LKA", "AS"),
    ("LSO", "AF"),
    ("LTU", "EU"),
    ("LUX", "EU"),
    ("LVA", "EU"),
    ("MAC", "AS"),
    ("MAR", "AF"),
    ("MCO", "EU"),
    ("MDA", "EU"),
    ("MDG", "AF"),
    ("MDV", "AS"),
    ("MEX", "NA"),
    ("MKD", "EU"),
    ("MLI", "AF"),
    ("MLT", "EU"),
    ("MMR", "AS"),
    ("MNE", "EU"),
    ("MNG", "AS"),
    ("MOZ", "AF"),
    ("MRT", "AF"),
    ("MUS", "AF"),
    ("MWI", "AF"),
    ("MYS", "AS"),
    ("NAM", "AF"),
    ("NER", "AF"),
    ("NGA", "AF"),
    ("NIC", "NA"),
    ("NLD", "EU"),
    ("NOR", "EU"),
    ("NPL", "AS"),
    ("NZL", "OC"),
    ("OMN", "AS"),
    ("PAK", "AS"),
    ("PAN", "NA"),
    ("PER", "SA"),
    ("PHL", "AS"),
    ("PNG", "OC"),
    ("POL", "EU"),
    ("PRI", "NA"),
    ("PRT", "EU"),
    ("PRY", "SA"),
    ("PSE", "AS"),
    ("QAT", "AS"),
    ("ROU", "EU"),
    ("RUS", "EU"),
    ("RWA", "AF"),
    ("SAU", "AS"),
    ("SDN", "AF"),
    ("SEN", "AF"),
    ("SGP", "AS"),
    ("SLB", "OC"),
    ("SLE", "AF"),
    ("SLV", "NA"),
    ("SMR", "EU"),
    ("SOM", "AF"),
    ("SRB", "EU"),
    ("SSD", "AF"),
    ("STP", "AF"),
    ("SUR", "SA"),
    ("SVK", "EU"),
    ("SVN", "EU"),
    ("SWE", "EU"),
    ("SWZ", "AF"),
    ("SXM", "NA"),
    ("SYC", "AF"),
    ("SYR", "AS"),
    ("TCA", "NA"),
    ("TCD", "AF"),
    ("TGO", "AF"),
    ("THA", "AS"),
    ("TJK", "AS"),
    ("TKM", "AS"),
    ("TLS", "AS"),
    ("TON", "OC"),
    ("TTO", "NA"),
    ("TUN", "AF"),
    ("TUR", "AS"),
    ("TWN", "AS"),
    ("TZA", "AF"),
    ("UGA", "AF"),
    ("UKR", "EU"),
    ("URY", "SA"),
    ("USA", "NA"),
    ("UZB", "AS"),
    ("VCT", "NA"),
    ("VEN", "SA"),
    ("VGB", "NA"),
    ("VNM", "AS"),
    ("VUT", "OC"),
    ("WSM", "OC"),
    ("YEM", "AS"),
    ("ZAF", "AF"),
    ("ZMB", "AF"),
    ("ZWE", "AF"),
];
