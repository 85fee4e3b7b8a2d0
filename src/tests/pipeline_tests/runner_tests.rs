use crate::domain::{Dollars, Field, ListingRecord, ListingStatus};
use crate::errors::RunError;
use crate::runner::{MortgageSource, NoopObserver, RunObserver};
use crate::tests::utils::{
    listing_page, ok, runner, settings, status, RecordingSleeper, ScriptedTransport, RETRY_DELAY,
};
use std::rc::Rc;
use std::time::Duration;

fn zpid_url(id: &str) -> String {
    format!("https://www.zillow.com/homedetails/{id}_zpid/")
}

fn in_pacing_window(d: Duration) -> bool {
    d >= Duration::from_millis(3_000) && d <= Duration::from_millis(5_000)
}

#[derive(Default)]
struct Recorder {
    started: Vec<(usize, usize)>,
    finished: Vec<ListingStatus>,
}

impl RunObserver for Recorder {
    fn on_listing_start(&mut self, position: usize, total: usize, _url: &str) {
        self.started.push((position, total));
    }

    fn on_record(&mut self, _position: usize, _total: usize, record: &ListingRecord) {
        self.finished.push(record.status);
    }
}

#[test]
fn failing_url_becomes_one_error_record_and_run_continues() {
    let transport = ScriptedTransport::default()
        .on("111_zpid", status(500))
        .on("222_zpid", ok(listing_page("9 Pine Rd, Austin, TX 78701", "$450,000", "")));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport.clone(), &["relay.test"], sleeper.clone(), settings(2));

    let urls = vec![zpid_url("111"), zpid_url("222")];
    let mut recorder = Recorder::default();
    let outcome = runner.run(&urls, &mut recorder).unwrap();

    assert_eq!(outcome.records.len(), 2);
    let failed = &outcome.records[0];
    assert_eq!(failed.status, ListingStatus::Error);
    assert_eq!(failed.url, urls[0]);
    assert_eq!(
        failed.error.as_deref(),
        Some("All proxies failed. Last error: HTTP 500")
    );
    assert_eq!(failed.address, Field::Unavailable);
    assert_eq!(failed.purchase_price, Field::Unavailable);

    let good = &outcome.records[1];
    assert_eq!(good.status, ListingStatus::Success);
    assert_eq!(good.jurisdiction, Field::Value("TX".to_string()));

    // Three attempts at the failing URL, one at the good one.
    assert_eq!(transport.requests.borrow().len(), 4);

    let slept = sleeper.slept.borrow();
    assert_eq!(slept.len(), 3);
    assert_eq!(slept[..2], [RETRY_DELAY, RETRY_DELAY]);
    assert!(in_pacing_window(slept[2]));

    assert_eq!(outcome.summary.successful, 1);
    assert_eq!(outcome.summary.failed, 1);
    assert_eq!(outcome.summary.total, 2);

    assert_eq!(recorder.started, [(1, 2), (2, 2)]);
    assert_eq!(recorder.finished, [ListingStatus::Error, ListingStatus::Success]);
}

#[test]
fn retry_recovers_a_flaky_listing() {
    let transport = ScriptedTransport::default()
        .on("333_zpid", status(502))
        .on("333_zpid", ok(listing_page("5 Lake Dr, Madison, WI", "$275,000", "")));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport, &["relay.test"], sleeper.clone(), settings(2));

    let outcome = runner.run(&[zpid_url("333")], &mut NoopObserver).unwrap();

    assert!(outcome.records[0].is_success());
    assert_eq!(outcome.records[0].error, None);
    assert_eq!(*sleeper.slept.borrow(), vec![RETRY_DELAY]);
}

#[test]
fn zero_retries_means_a_single_attempt() {
    let transport = ScriptedTransport::default().on("444_zpid", status(404));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport.clone(), &["relay.test"], sleeper.clone(), settings(0));

    let outcome = runner.run(&[zpid_url("444")], &mut NoopObserver).unwrap();

    assert_eq!(outcome.records[0].status, ListingStatus::Error);
    assert_eq!(transport.requests.borrow().len(), 1);
    assert!(sleeper.slept.borrow().is_empty());
}

#[test]
fn pacing_only_between_listings() {
    let page = listing_page("12 Oak Ave, Denver, CO 80202", "$615,000", "");
    let transport = ScriptedTransport::default().on("relay.test", ok(page));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport, &["relay.test"], sleeper.clone(), settings(2));

    let urls: Vec<String> = ["1", "2", "3"].iter().map(|id| zpid_url(id)).collect();
    let outcome = runner.run(&urls, &mut NoopObserver).unwrap();

    assert_eq!(outcome.summary.successful, 3);
    let slept = sleeper.slept.borrow();
    assert_eq!(slept.len(), 2);
    assert!(slept.iter().all(|d| in_pacing_window(*d)));
}

#[test]
fn empty_url_list_is_rejected() {
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(ScriptedTransport::default(), &["relay.test"], sleeper, settings(2));

    let err = runner.run(&[], &mut NoopObserver).unwrap_err();
    assert_eq!(err, RunError::NoValidUrls);
    assert!(!runner.is_running());
}

#[test]
fn overlapping_run_is_refused() {
    let page = listing_page("12 Oak Ave, Denver, CO 80202", "$615,000", "");
    let transport = ScriptedTransport::default().on("relay.test", ok(page));
    let sleeper = Rc::new(RecordingSleeper::default());
    let runner = runner(transport.clone(), &["relay.test"], sleeper, settings(2));
    let urls = vec![zpid_url("1")];

    {
        let _guard = runner.begin().unwrap();
        assert!(runner.is_running());
        let err = runner.run(&urls, &mut NoopObserver).unwrap_err();
        assert_eq!(err, RunError::AlreadyRunning);
        assert!(transport.requests.borrow().is_empty());
    }

    assert!(!runner.is_running());
    assert!(runner.run(&urls, &mut NoopObserver).is_ok());
    assert!(!runner.is_running());
}

#[test]
fn page_mortgage_source_uses_the_listed_payment() {
    let page = listing_page(
        "1 Main St, Springfield, IL",
        "$300,000",
        "<div>Est. payment: $1,700/mo</div>",
    );
    let transport = ScriptedTransport::default().on("relay.test", ok(page));
    let sleeper = Rc::new(RecordingSleeper::default());
    let mut run_settings = settings(2);
    run_settings.mortgage_source = MortgageSource::Page;
    let runner = runner(transport, &["relay.test"], sleeper, run_settings);

    let outcome = runner.run(&[zpid_url("55")], &mut NoopObserver).unwrap();
    let record = &outcome.records[0];

    assert_eq!(record.estimated_mortgage, Field::Value(Dollars(1_700)));
    assert_eq!(record.down_payment, Field::Value(Dollars(60_000)));
    assert_eq!(record.total_monthly_payment, Field::Value(Dollars(2_355)));
}

#[test]
fn page_mortgage_source_without_a_listed_payment() {
    let page = listing_page("1 Main St, Springfield, IL", "$300,000", "");
    let transport = ScriptedTransport::default().on("relay.test", ok(page));
    let sleeper = Rc::new(RecordingSleeper::default());
    let mut run_settings = settings(2);
    run_settings.mortgage_source = MortgageSource::Page;
    let runner = runner(transport, &["relay.test"], sleeper, run_settings);

    let outcome = runner.run(&[zpid_url("56")], &mut NoopObserver).unwrap();
    let record = &outcome.records[0];

    assert!(record.is_success());
    assert_eq!(record.down_payment, Field::Value(Dollars(60_000)));
    assert_eq!(record.estimated_mortgage, Field::Unavailable);
    assert_eq!(record.total_monthly_payment, Field::Unavailable);
}
