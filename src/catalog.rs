//! The product catalog whose thumbnails are resolved
//!
//! The list is compiled in and processed in this order. Entries are used
//! verbatim as cache keys, so the website must look them up by the exact
//! same strings.

/// Product page URLs, in processing order
pub const PRODUCT_URLS: &[&str] = &[
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-bloemen/694349",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-fijnste-kleuren/864691",
    "https://www.werkaandemuur.nl/nl/werk/Portret-van-een-man/826273",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-vlinders/857847",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-rode-bloemen/858102",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-krullen/863445",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-in-het-blauw/865201",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-gouden-oorbel/860788",
    "https://www.werkaandemuur.nl/nl/werk/Botanisch-meisje/862834",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-paarse-bloemen/864088",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-rozen/862987",
    "https://www.werkaandemuur.nl/nl/werk/Zelfportret-met-vlinders/858281",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-wijze-ogen/865525",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-het-roze-bloemen/865526",
    "https://www.werkaandemuur.nl/nl/werk/Portret-van-een-vrouw/865527",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-blauwe-ogen/865528",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-rode-lippen/865529",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-gouden-ketting/865530",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-hoed/865531",
    "https://www.werkaandemuur.nl/nl/werk/Portret-in-geel/865532",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-parel/865533",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-sluier/865534",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-zonnebloemen/865535",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-vlecht/865536",
    "https://www.werkaandemuur.nl/nl/werk/Portret-van-een-dame/865537",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-waaier/865538",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-mandarijn/865539",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-rozenkrans/865540",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-fluit/865541",
    "https://www.werkaandemuur.nl/nl/werk/Portret-in-groen/865542",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-spiegel/865543",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-veer/865544",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-orchidee/865545",
    "https://www.werkaandemuur.nl/nl/werk/Het-meisje-met-de-paraplu/865546",
    "https://www.werkaandemuur.nl/nl/werk/Portret-in-rood/865547",
    "https://www.werkaandemuur.nl/nl/werk/De-vrouw-met-de-harp/865548",
    "https://www.werkaandemuur.nl/nl/werk/Meisje-met-de-duif/865549",
    "https://www.werkaandemuur.nl/nl/werk/Vrouw-met-de-anjers/865550",
];

/// Returns the catalog as owned strings, ready to hand to the coordinator
pub fn product_urls() -> Vec<String> {
    PRODUCT_URLS.iter().map(|url| url.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use url::Url;

    #[test]
    fn test_catalog_urls_are_unique() {
        let unique: HashSet<_> = PRODUCT_URLS.iter().collect();
        assert_eq!(unique.len(), PRODUCT_URLS.len());
    }

    #[test]
    fn test_catalog_urls_are_https() {
        for url in PRODUCT_URLS {
            let parsed = Url::parse(url).unwrap();
            assert_eq!(parsed.scheme(), "https", "{}", url);
        }
    }

    #[test]
    fn test_product_urls_preserves_order() {
        let urls = product_urls();
        assert_eq!(urls.len(), PRODUCT_URLS.len());
        assert_eq!(urls[0], PRODUCT_URLS[0]);
        assert_eq!(urls[urls.len() - 1], PRODUCT_URLS[PRODUCT_URLS.len() - 1]);
    }
}
