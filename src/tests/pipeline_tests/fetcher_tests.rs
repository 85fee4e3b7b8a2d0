use crate::scraper::{FetchError, ProxyFetcher, RelayTemplate};
use crate::tests::utils::{
    fetcher, listing_html, ok, status, RecordingSleeper, ScriptedTransport, RELAY_PAUSE,
};
use std::rc::Rc;
use std::time::Duration;

const TARGET: &str = "https://www.zillow.com/homedetails/42-Elm-St/42_zpid/";

#[test]
fn falls_through_to_next_relay_and_sticks_with_it() {
    let page = listing_html("<p>Listing</p>");
    let transport = ScriptedTransport::default()
        .on("r1.test", status(503))
        .on("r2.test", ok(page.clone()));
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = fetcher(transport.clone(), &["r1.test", "r2.test"], sleeper.clone());

    assert_eq!(fetcher.fetch(TARGET).unwrap(), page);
    assert_eq!(fetcher.cursor(), 1);

    // The next fetch starts at the relay that worked.
    assert_eq!(fetcher.fetch(TARGET).unwrap(), page);
    assert_eq!(transport.hosts(), ["r1.test", "r2.test", "r2.test"]);
    assert_eq!(*sleeper.slept.borrow(), vec![RELAY_PAUSE]);
}

#[test]
fn timed_out_relay_falls_through_after_a_pause() {
    let page = listing_html("<p>Listing</p>");
    let transport = ScriptedTransport::default()
        .on("r1.test", Err(FetchError::Timeout(Duration::from_secs(15))))
        .on("r2.test", ok(page.clone()));
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = fetcher(transport.clone(), &["r1.test", "r2.test"], sleeper.clone());

    assert_eq!(fetcher.fetch(TARGET).unwrap(), page);
    assert_eq!(transport.hosts(), ["r1.test", "r2.test"]);
    assert_eq!(*sleeper.slept.borrow(), vec![RELAY_PAUSE]);
    assert_eq!(fetcher.cursor(), 1);
}

#[test]
fn cursor_wraps_around_the_relay_list() {
    let page = listing_html("<p>Listing</p>");
    let transport = ScriptedTransport::default()
        .on("r1.test", status(429))
        .on("r1.test", ok(page.clone()))
        .on("r2.test", ok(page.clone()))
        .on("r2.test", status(502));
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = fetcher(transport.clone(), &["r1.test", "r2.test"], sleeper);

    fetcher.fetch(TARGET).unwrap();
    assert_eq!(fetcher.cursor(), 1);
    fetcher.fetch(TARGET).unwrap();
    assert_eq!(fetcher.cursor(), 0);
    assert_eq!(transport.hosts(), ["r1.test", "r2.test", "r2.test", "r1.test"]);
}

#[test]
fn every_relay_failing_reports_the_last_cause() {
    let stub = "<html><body>Please verify you are a human</body></html>".to_string();
    let stub_len = stub.len();
    let transport = ScriptedTransport::default().on("r2.test", ok(stub));
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = fetcher(transport.clone(), &["r1.test", "r2.test"], sleeper.clone());

    let err = fetcher.fetch(TARGET).unwrap_err();
    assert_eq!(
        err,
        FetchError::AllRelaysFailed(Box::new(FetchError::InvalidContent(stub_len)))
    );
    assert!(err.to_string().starts_with("All proxies failed. Last error:"));

    // No pause after the final relay.
    assert_eq!(sleeper.slept.borrow().len(), 1);
    // A failed fetch leaves the cursor alone.
    assert_eq!(fetcher.cursor(), 0);
}

#[test]
fn relay_request_carries_the_encoded_target() {
    let transport = ScriptedTransport::default().on("r1.test", ok(listing_html("")));
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = fetcher(transport.clone(), &["r1.test"], sleeper);

    fetcher.fetch(TARGET).unwrap();
    assert_eq!(
        transport.requests.borrow()[0],
        "https://r1.test/raw?url=https%3A%2F%2Fwww.zillow.com%2Fhomedetails%2F42-Elm-St%2F42_zpid%2F"
    );
}

#[test]
fn no_relays_is_an_error() {
    let sleeper = Rc::new(RecordingSleeper::default());
    let fetcher = ProxyFetcher::new(
        Box::new(ScriptedTransport::default()),
        Vec::<RelayTemplate>::new(),
        Duration::from_millis(1),
        sleeper,
    );
    assert_eq!(fetcher.fetch(TARGET), Err(FetchError::NoRelays));
}
