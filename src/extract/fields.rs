// src/extract/fields.rs

use crate::domain::{Dollars, Field, ListingExtras};
use crate::errors::ExtractorBuildError;
use crate::extract::names::clean_agent_name;
use crate::extract::page::Page;
use crate::extract::rules::{Cascade, FieldRules, Locator, Pick};
use crate::finance::parse_price;

/// Sane listing-price band for prices found in free text.
pub const MIN_LISTING_PRICE: u64 = 50_000;
pub const MAX_LISTING_PRICE: u64 = 50_000_000;
/// Bed and bath counts above this are page noise.
pub const MAX_ROOM_COUNT: u32 = 20;

const WHOLE: &str = r"(?s)^(.*\S.*)$";

/* ---------------- Acceptors ---------------- */

fn accept_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn accept_dollars(s: &str) -> Option<Dollars> {
    parse_price(s).map(Dollars)
}

/// `120,000` style amounts inside the listing-price band.
fn accept_listing_price(s: &str) -> Option<Dollars> {
    let mut groups = s.split(',');
    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    let rest_ok = groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));
    if !(lead_ok && rest_ok) {
        return None;
    }
    parse_price(s)
        .filter(|p| (MIN_LISTING_PRICE..=MAX_LISTING_PRICE).contains(p))
        .map(Dollars)
}

fn accept_monthly_payment(s: &str) -> Option<Dollars> {
    parse_price(s).filter(|p| (100..=100_000).contains(p)).map(Dollars)
}

fn accept_rooms(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|n| *n <= MAX_ROOM_COUNT)
}

fn accept_baths(s: &str) -> Option<f32> {
    s.parse::<f32>()
        .ok()
        .filter(|n| (0.0..=MAX_ROOM_COUNT as f32).contains(n))
}

fn accept_year(s: &str) -> Option<u16> {
    s.parse::<u16>().ok().filter(|y| (1700..=2100).contains(y))
}

fn accept_sqft(s: &str) -> Option<u32> {
    s.replace(',', "").parse::<u32>().ok().filter(|n| *n > 0)
}

fn accept_days(s: &str) -> Option<u32> {
    s.parse::<u32>().ok()
}

fn accept_name(s: &str) -> Option<String> {
    clean_agent_name(s)
}

fn accept_email(s: &str) -> Option<String> {
    let lower = s.to_ascii_lowercase();
    let site_address = ["zilla.com", "zillow.com", "noreply", "support"]
        .iter()
        .any(|marker| lower.contains(marker));
    (!site_address).then(|| s.to_string())
}

/* ---------------- Strategy tables ---------------- */

static ADDRESS: FieldRules<String> = FieldRules {
    name: "address",
    locators: &[
        Locator { selector: r#"h1[data-testid="property-details-address"]"#, shape: WHOLE },
        Locator { selector: ".summary-container h1", shape: WHOLE },
        Locator { selector: ".ds-address-container h1", shape: WHOLE },
        Locator { selector: ".zsg-photo-card-address", shape: WHOLE },
        Locator { selector: "h1.notranslate", shape: WHOLE },
        Locator { selector: r#"[data-testid="bdp-building-address"]"#, shape: WHOLE },
    ],
    patterns: &[
        r"(\d+\s+[A-Za-z\s]+(?:St|Ave|Rd|Dr|Ln|Blvd|Way|Ct|Pl|Cir)[^,]*,\s*[A-Za-z\s]+,\s*[A-Z]{2})",
    ],
    pick: Pick::First,
    accept: accept_text,
    accept_text: accept_text,
};

static PRICE: FieldRules<Dollars> = FieldRules {
    name: "price",
    locators: &[
        Locator { selector: r#"[data-testid="price"]"#, shape: r"\$[\d,]+" },
        Locator { selector: ".summary-container .notranslate", shape: r"\$[\d,]+" },
        Locator { selector: ".ds-price .ds-value", shape: r"\$[\d,]+" },
        Locator { selector: ".zsg-photo-card-price", shape: r"\$[\d,]+" },
        Locator { selector: ".price-large", shape: r"\$[\d,]+" },
        Locator {
            selector: r#"[data-testid="price-history"] .Text-c11n-8-84-3__sc-aiai24-0"#,
            shape: r"\$[\d,]+",
        },
    ],
    // Standalone figures only: `$` at the start of text or after whitespace.
    patterns: &[r"(?:^|\s)\$([\d,]*\d)"],
    pick: Pick::Maximum,
    accept: accept_dollars,
    accept_text: accept_listing_price,
};

static BEDS: FieldRules<u32> = FieldRules {
    name: "beds",
    locators: &[
        Locator {
            selector: r#"[data-testid="bed-bath-item"]:first-child"#,
            shape: r"(?i)(\d+)\s*bed",
        },
        Locator {
            selector: ".ds-bed-bath-living-area-container span:first-child",
            shape: r"(?i)(\d+)\s*bed",
        },
        Locator {
            selector: ".zsg-content-header-top-container .zsg-icon-bed + span",
            shape: r"(?i)(\d+)\s*bed",
        },
        Locator {
            selector: r#"[data-testid="bed-bath-beyond-facts"] span:first-child"#,
            shape: r"(?i)(\d+)\s*bed",
        },
    ],
    patterns: &[
        r"(?i)(\d{1,2})\s*bed(?:room)?s?\s",
        r"(?i)(\d{1,2})\s*bd\s",
        r"(?i)(\d{1,2})\s*br\s",
        r"(?i)Bedrooms?[:\s]*(\d{1,2})",
        r"(?i)(\d{1,2})\s*(?:bed|bedroom)s?(?:\s|$|,|\.|/)",
    ],
    pick: Pick::MostFrequent,
    accept: accept_rooms,
    accept_text: accept_rooms,
};

static BATHS: FieldRules<f32> = FieldRules {
    name: "baths",
    locators: &[
        Locator {
            selector: r#"[data-testid="bed-bath-item"]:nth-child(2)"#,
            shape: r"(?i)(\d+(?:\.\d+)?)\s*bath",
        },
        Locator {
            selector: ".ds-bed-bath-living-area-container span:nth-child(2)",
            shape: r"(?i)(\d+(?:\.\d+)?)\s*bath",
        },
        Locator {
            selector: ".zsg-content-header-top-container .zsg-icon-bath + span",
            shape: r"(?i)(\d+(?:\.\d+)?)\s*bath",
        },
        Locator {
            selector: r#"[data-testid="bed-bath-beyond-facts"] span:nth-child(2)"#,
            shape: r"(?i)(\d+(?:\.\d+)?)\s*bath",
        },
    ],
    patterns: &[
        r"(?i)(\d+(?:\.\d+)?)\s*(?:bath|bathroom)",
        r"(?i)Bathrooms?[:\s]*(\d+(?:\.\d+)?)",
        r"(?i)(\d+(?:\.\d+)?)\s*ba\s",
    ],
    pick: Pick::First,
    accept: accept_baths,
    accept_text: accept_baths,
};

static YEAR_BUILT: FieldRules<u16> = FieldRules {
    name: "year_built",
    locators: &[],
    patterns: &[
        r"(?i)Built in (\d{4})",
        r"(?i)Year built:?\s*(\d{4})",
        r"(?i)(\d{4})\s*built",
    ],
    pick: Pick::First,
    accept: accept_year,
    accept_text: accept_year,
};

static SQFT: FieldRules<u32> = FieldRules {
    name: "sqft",
    locators: &[
        Locator {
            selector: r#"[data-testid="bed-bath-item"]:last-child"#,
            shape: r"(?i)([\d,]+)\s*sqft",
        },
        Locator {
            selector: ".ds-bed-bath-living-area-container span:last-child",
            shape: r"(?i)([\d,]+)\s*sqft",
        },
        Locator {
            selector: ".zsg-content-header-top-container .zsg-icon-sqft + span",
            shape: r"(?i)([\d,]+)\s*sqft",
        },
        Locator {
            selector: r#"[data-testid="bed-bath-beyond-facts"] span:last-child"#,
            shape: r"(?i)([\d,]+)\s*sqft",
        },
    ],
    patterns: &[r"(?i)([\d,]+)\s*(?:sqft|sq\.?\s*ft\.?|square feet)"],
    pick: Pick::First,
    accept: accept_sqft,
    accept_text: accept_sqft,
};

static DAYS_LISTED: FieldRules<u32> = FieldRules {
    name: "days_listed",
    locators: &[],
    patterns: &[
        r"(?i)(\d+)\s*days?\s*on\s*(?:zilla|zillow)",
        r"(?i)listed\s*(\d+)\s*days?\s*ago",
        r"(?i)on\s*market\s*(\d+)\s*days?",
    ],
    pick: Pick::First,
    accept: accept_days,
    accept_text: accept_days,
};

static REALTOR_NAME: FieldRules<String> = FieldRules {
    name: "realtor_name",
    locators: &[
        Locator {
            selector: r#"[data-testid="attribution-LISTING_AGENT"] .Text-c11n-8-84-3__sc-aiai24-0"#,
            shape: WHOLE,
        },
        Locator { selector: ".ds-agent-name", shape: WHOLE },
        Locator { selector: ".zsg-pro-name a", shape: WHOLE },
        Locator { selector: ".listing-agent-name", shape: WHOLE },
        Locator { selector: r#"[data-testid="attribution-LISTING_AGENT"]"#, shape: WHOLE },
        Locator { selector: ".agent-name", shape: WHOLE },
        Locator { selector: ".listing-agent", shape: WHOLE },
    ],
    patterns: &[
        r"(?i)Listed\s*by[:\s]*([A-Za-z\s.\-']+?)(?:\s*\||$|\n|,|\s{2,}|\d)",
        r"(?i)Listing\s*agent[:\s]*([A-Za-z\s.\-']+?)(?:\s*\||$|\n|,|\s{2,}|\d)",
        r"(?i)Agent[:\s]*([A-Za-z\s.\-']+?)(?:\s*\||$|\n|,|\s{2,}|\d)",
        r"(?i)Realtor[:\s]*([A-Za-z\s.\-']+?)(?:\s*\||$|\n|,|\s{2,}|\d)",
        r"(?i)Contact\s*([A-Za-z\s.\-']+?)(?:\s*\||$|\n|,|\s{2,}|\d)",
    ],
    pick: Pick::First,
    accept: accept_name,
    accept_text: accept_name,
};

/// Principal & interest estimate printed on the page, e.g. "Est. payment: $2,104/mo".
static PAGE_MORTGAGE: FieldRules<Dollars> = FieldRules {
    name: "page_mortgage",
    locators: &[],
    patterns: &[
        r"(?i)est\.?\s*payment[:\s]*\$([\d,]+)",
        r"(?i)monthly\s*payment[:\s]*\$([\d,]+)",
        r"(?i)\$([\d,]+)\s*/\s*mo\b",
    ],
    pick: Pick::MostFrequent,
    accept: accept_monthly_payment,
    accept_text: accept_monthly_payment,
};

static CURRENT_RENT: FieldRules<Dollars> = FieldRules {
    name: "current_rent",
    locators: &[],
    patterns: &[
        r"(?i)currently renting (?:at|for)\s*\$?([\d,]+)",
        r"(?i)gross rent\s*:?\s*\$?([\d,]+)",
        r"(?i)occupied tenant\s*.*?\$?([\d,]+)",
        r"(?i)leased until\s*.*?\$?([\d,]+)",
        r"(?i)rental income\s*:?\s*\$?([\d,]+)",
        r"(?i)rent\s*:?\s*\$?([\d,]+)",
    ],
    pick: Pick::First,
    accept: accept_dollars,
    accept_text: accept_dollars,
};

static LAST_SALE_DATE: FieldRules<String> = FieldRules {
    name: "last_sale_date",
    locators: &[],
    patterns: &[
        r"(?i)sold\s*(?:on|in)?\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"(?i)last\s*sold\s*:?\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"(?i)sale\s*date\s*:?\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
    ],
    pick: Pick::First,
    accept: accept_text,
    accept_text: accept_text,
};

static LAST_SALE_PRICE: FieldRules<Dollars> = FieldRules {
    name: "last_sale_price",
    locators: &[],
    patterns: &[
        r"(?i)sold\s*(?:for|at)?\s*\$?([\d,]+)",
        r"(?i)last\s*sold\s*(?:for|at)?\s*:?\s*\$?([\d,]+)",
        r"(?i)sale\s*price\s*:?\s*\$?([\d,]+)",
    ],
    pick: Pick::First,
    accept: accept_dollars,
    accept_text: accept_dollars,
};

static AGENT_EMAIL: FieldRules<String> = FieldRules {
    name: "agent_email",
    locators: &[],
    patterns: &[r"([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})"],
    pick: Pick::First,
    accept: accept_email,
    accept_text: accept_email,
};

/* ---------------- Extractor ---------------- */

/// Everything the page itself can tell us about a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub address: Field<String>,
    pub price: Field<Dollars>,
    pub beds: Field<u32>,
    pub baths: Field<f32>,
    pub year_built: Field<u16>,
    pub sqft: Field<u32>,
    pub days_listed: Field<u32>,
    pub realtor_name: Field<String>,
    pub page_mortgage: Field<Dollars>,
    pub extras: ListingExtras,
}

/// Compiled strategy tables for every field. Build once, reuse per page.
pub struct Extractor {
    address: Cascade<String>,
    price: Cascade<Dollars>,
    beds: Cascade<u32>,
    baths: Cascade<f32>,
    year_built: Cascade<u16>,
    sqft: Cascade<u32>,
    days_listed: Cascade<u32>,
    realtor_name: Cascade<String>,
    page_mortgage: Cascade<Dollars>,
    current_rent: Cascade<Dollars>,
    last_sale_date: Cascade<String>,
    last_sale_price: Cascade<Dollars>,
    agent_email: Cascade<String>,
}

impl Extractor {
    pub fn new() -> Result<Self, ExtractorBuildError> {
        Ok(Self {
            address: Cascade::build(&ADDRESS)?,
            price: Cascade::build(&PRICE)?,
            beds: Cascade::build(&BEDS)?,
            baths: Cascade::build(&BATHS)?,
            year_built: Cascade::build(&YEAR_BUILT)?,
            sqft: Cascade::build(&SQFT)?,
            days_listed: Cascade::build(&DAYS_LISTED)?,
            realtor_name: Cascade::build(&REALTOR_NAME)?,
            page_mortgage: Cascade::build(&PAGE_MORTGAGE)?,
            current_rent: Cascade::build(&CURRENT_RENT)?,
            last_sale_date: Cascade::build(&LAST_SALE_DATE)?,
            last_sale_price: Cascade::build(&LAST_SALE_PRICE)?,
            agent_email: Cascade::build(&AGENT_EMAIL)?,
        })
    }

    /// Never fails: fields nothing plausible was found for are `Unavailable`.
    pub fn extract(&self, raw_html: &str) -> ExtractedFields {
        let page = Page::parse(raw_html);

        ExtractedFields {
            address: self.address.extract(&page),
            price: self.price.extract(&page),
            beds: self.beds.extract(&page),
            baths: self.baths.extract(&page),
            year_built: self.year_built.extract(&page),
            sqft: self.sqft.extract(&page),
            days_listed: self.days_listed.extract(&page),
            realtor_name: self.realtor_name.extract(&page),
            page_mortgage: self.page_mortgage.extract(&page),
            extras: ListingExtras {
                current_rent: self.current_rent.extract(&page),
                last_sale_date: self.last_sale_date.extract(&page),
                last_sale_price: self.last_sale_price.extract(&page),
                agent_email: self.agent_email.extract(&page),
            },
        }
    }
}
