use crate::domain::{Dollars, Field, ListingStatus};
use crate::runner::NoopObserver;
use crate::spreadsheets::{export, ExportFormat};
use crate::tests::utils::{listing_page, ok, runner, settings, RecordingSleeper, ScriptedTransport};
use std::rc::Rc;

#[test]
fn scrape_estimate_and_export_one_listing() {
    let page = listing_page(
        "1 Main St, Springfield, IL",
        "$300,000",
        r#"<ul data-testid="bed-bath-beyond-facts">
             <span>3 beds</span><span>2 baths</span><span>1,850 sqft</span>
           </ul>
           <p>Built in 1998</p>"#,
    );
    let transport = ScriptedTransport::default().on("relay.test", ok(page));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport, &["relay.test"], sleeper, settings(2));

    let url = "https://site.com/homedetails/123_zpid".to_string();
    let outcome = runner.run(&[url.clone()], &mut NoopObserver).unwrap();
    let record = &outcome.records[0];

    assert_eq!(record.status, ListingStatus::Success);
    assert_eq!(record.url, url);
    assert_eq!(record.address, Field::Value("1 Main St, Springfield, IL".to_string()));
    assert_eq!(record.jurisdiction, Field::Value("IL".to_string()));
    assert_eq!(record.purchase_price, Field::Value(Dollars(300_000)));
    assert_eq!(record.down_payment, Field::Value(Dollars(60_000)));
    assert_eq!(record.estimated_mortgage, Field::Value(Dollars(1_621)));
    assert_eq!(record.total_monthly_payment, Field::Value(Dollars(2_276)));
    assert_eq!(record.beds, Field::Value(3));
    assert_eq!(record.baths, Field::Value(2.0));
    assert_eq!(record.sqft, Field::Value(1_850));
    assert_eq!(record.year_built, Field::Value(1998));
    assert_eq!(record.days_listed, Field::Unavailable);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let written = export(&outcome.records, ExportFormat::Csv, true, Some(&path)).unwrap();
    assert_eq!(written, path);

    let csv = std::fs::read_to_string(&path).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains("\"$300,000\""), "{row}");
    assert!(row.contains("\"$1,621\""), "{row}");
    assert!(row.contains("\"$2,276\""), "{row}");
}
