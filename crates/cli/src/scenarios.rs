//! Built-in scenario definitions for the Sauce Demo storefront.
//!
//! Selector strings and test data here are fixed configuration; all
//! control flow lives in the engine. Prices are always read before the
//! click that mutates the page, so no observation depends on a re-rendered
//! collection.

use shopwalk_engine::money::Money;
use shopwalk_engine::scenario::{Expectation, Locator, Scenario, Step};

const PASSWORD: &str = "secret_sauce";
const LOCKOUT_MESSAGE: &str = "Sorry, this user has been locked out.";
const ORDER_CONFIRMATION: &str = "THANK YOU FOR YOUR ORDER";

/// Fixed tax added by the storefront on top of the item total
const SALES_TAX: Money = Money::from_cents(299);

pub fn all(base_url: &str) -> Vec<Scenario> {
    vec![
        login_locked(base_url),
        checkout(base_url),
        glitch_checkout(base_url),
    ]
}

pub fn by_name(name: &str, base_url: &str) -> Option<Scenario> {
    all(base_url).into_iter().find(|s| s.name == name)
}

fn login_steps(user: &str) -> Vec<Step> {
    vec![
        Step::type_text("Entered the user name", Locator::id("user-name"), user),
        Step::type_text("Entered the password", Locator::id("password"), PASSWORD),
        Step::click("Submitted the login form", Locator::id("login-button")),
    ]
}

fn reset_app_state() -> Vec<Step> {
    vec![
        Step::click("Opened the side menu", Locator::id("react-burger-menu-btn")),
        Step::wait_visible(
            "Side menu finished sliding in",
            Locator::id("reset_sidebar_link"),
        ),
        Step::click("Reset the app state", Locator::id("reset_sidebar_link")),
        Step::click("Closed the side menu", Locator::id("react-burger-cross-btn")),
    ]
}

fn reset_and_logout() -> Vec<Step> {
    vec![
        Step::click("Opened the side menu", Locator::id("react-burger-menu-btn")),
        Step::wait_visible(
            "Side menu finished sliding in",
            Locator::id("reset_sidebar_link"),
        ),
        Step::click("Reset the app state", Locator::id("reset_sidebar_link")),
        Step::click("Logged out", Locator::id("logout_sidebar_link")),
    ]
}

fn checkout_info() -> Vec<Step> {
    vec![
        Step::click("Started the checkout", Locator::id("checkout")),
        Step::type_text("Entered the first name", Locator::id("first-name"), "Test"),
        Step::type_text("Entered the last name", Locator::id("last-name"), "User"),
        Step::type_text("Entered the postal code", Locator::id("postal-code"), "12345"),
        Step::click("Continued to the order summary", Locator::id("continue")),
    ]
}

/// A locked-out account is refused with the expected error banner.
fn login_locked(base_url: &str) -> Scenario {
    let mut steps = vec![Step::navigate("Opened the storefront login page", base_url)];
    steps.extend(login_steps("locked_out_user"));
    steps.push(Step::wait_visible(
        "Error banner became visible",
        Locator::css(".error-message-container"),
    ));
    steps.push(
        Step::read_text(
            "Verified the lockout message",
            Locator::css(".error-message-container"),
        )
        .expecting(Expectation::TextContains(LOCKOUT_MESSAGE.into())),
    );

    Scenario {
        name: "login-locked".into(),
        description: "A locked-out account is refused with the expected error banner".into(),
        base_url: base_url.into(),
        steps,
    }
}

/// Three items bought end to end; the displayed total must match the sum
/// of the prices scraped off the shelf.
fn checkout(base_url: &str) -> Scenario {
    let mut steps = vec![Step::navigate("Opened the storefront login page", base_url)];
    steps.extend(login_steps("standard_user"));
    steps.extend(reset_app_state());

    for index in 0..3 {
        steps.push(Step::read_amount(
            format!("Recorded the price of item {}", index + 1),
            Locator::nth_within(".inventory_item", index, ".inventory_item_price"),
            "cart_total",
        ));
        steps.push(Step::click(
            format!("Added item {} to the cart", index + 1),
            Locator::nth_within(".inventory_item", index, ".btn_inventory"),
        ));
    }

    steps.push(Step::click("Opened the cart", Locator::css(".shopping_cart_link")));
    steps.push(
        Step::count("Confirmed the cart holds three items", Locator::css(".cart_item"))
            .expecting(Expectation::CountEquals(3)),
    );
    for index in 0..3 {
        steps.push(Step::read_text(
            format!("Read the name of cart item {}", index + 1),
            Locator::nth_within(".cart_item", index, ".inventory_item_name"),
        ));
    }

    steps.extend(checkout_info());
    steps.push(
        Step::read_text(
            "Verified the displayed total",
            Locator::css(".summary_total_label"),
        )
        .expecting(Expectation::TotalEquals {
            key: "cart_total".into(),
            surcharge: Money::ZERO,
        }),
    );
    steps.push(Step::click("Completed the purchase", Locator::id("finish")));
    steps.push(
        Step::read_text("Confirmed the order", Locator::css(".complete-header"))
            .expecting(Expectation::TextEquals(ORDER_CONFIRMATION.into())),
    );
    steps.extend(reset_and_logout());

    Scenario {
        name: "checkout".into(),
        description: "Three items bought end to end; displayed total matches the scraped prices"
            .into(),
        base_url: base_url.into(),
        steps,
    }
}

/// Single product bought on the deliberately slow account, sorted Z to A
/// first; the displayed total must include the fixed tax.
fn glitch_checkout(base_url: &str) -> Scenario {
    let mut steps = vec![Step::navigate("Opened the storefront login page", base_url)];
    steps.extend(login_steps("performance_glitch_user"));
    steps.extend(reset_app_state());

    steps.push(Step::select(
        "Sorted products by name, Z to A",
        Locator::css(".product_sort_container"),
        "za",
    ));
    steps.push(Step::read_remember(
        "Noted the first product's name",
        Locator::nth_within(".inventory_item", 0, ".inventory_item_name"),
        "product_name",
    ));
    steps.push(Step::read_amount(
        "Recorded the product price",
        Locator::nth_within(".inventory_item", 0, ".inventory_item_price"),
        "order_total",
    ));
    steps.push(Step::click(
        "Added the product to the cart",
        Locator::nth_within(".inventory_item", 0, ".btn_inventory"),
    ));

    steps.push(Step::click("Opened the cart", Locator::css(".shopping_cart_link")));
    steps.push(
        Step::read_text(
            "Verified the product name in the cart",
            Locator::css(".inventory_item_name"),
        )
        .expecting(Expectation::MatchesRemembered {
            key: "product_name".into(),
        }),
    );

    steps.extend(checkout_info());
    steps.push(
        Step::read_text(
            "Verified the total including tax",
            Locator::css(".summary_total_label"),
        )
        .expecting(Expectation::TotalEquals {
            key: "order_total".into(),
            surcharge: SALES_TAX,
        }),
    );
    steps.push(Step::click("Completed the purchase", Locator::id("finish")));
    steps.push(
        Step::read_text("Confirmed the order", Locator::css(".complete-header"))
            .expecting(Expectation::TextEquals(ORDER_CONFIRMATION.into())),
    );
    steps.extend(reset_and_logout());

    Scenario {
        name: "glitch-checkout".into(),
        description: "Single sorted product bought on the slow account; total includes the fixed tax"
            .into(),
        base_url: base_url.into(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopwalk_engine::scenario::{Capture, StepAction};

    const BASE: &str = "https://www.saucedemo.com";

    #[test]
    fn three_scenarios_with_unique_names() {
        let scenarios = all(BASE);
        assert_eq!(scenarios.len(), 3);
        let mut names: Vec<_> = scenarios.iter().map(|s| s.name.clone()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn lookup_by_name() {
        assert!(by_name("checkout", BASE).is_some());
        assert!(by_name("login-locked", BASE).is_some());
        assert!(by_name("glitch-checkout", BASE).is_some());
        assert!(by_name("nope", BASE).is_none());
    }

    #[test]
    fn every_scenario_begins_with_navigation() {
        for scenario in all(BASE) {
            assert!(
                matches!(scenario.steps[0].action, StepAction::Navigate { .. }),
                "{} should start by navigating",
                scenario.name
            );
        }
    }

    #[test]
    fn checkout_accumulates_three_prices() {
        let scenario = by_name("checkout", BASE).unwrap();
        let price_reads = scenario
            .steps
            .iter()
            .filter(|s| {
                matches!(
                    &s.action,
                    StepAction::ReadText {
                        capture: Some(Capture::Amount { key }),
                        ..
                    } if key == "cart_total"
                )
            })
            .count();
        assert_eq!(price_reads, 3);
    }

    #[test]
    fn checkout_reads_each_price_before_the_click_that_adds_it() {
        let scenario = by_name("checkout", BASE).unwrap();
        for index in 0..3 {
            let read_at = scenario
                .steps
                .iter()
                .position(|s| matches!(
                    &s.action,
                    StepAction::ReadText { locator: Locator::Nth { index: i, within: Some(w), .. }, .. }
                        if *i == index && w == ".inventory_item_price"
                ))
                .expect("price read present");
            let click_at = scenario
                .steps
                .iter()
                .position(|s| matches!(
                    &s.action,
                    StepAction::Click { locator: Locator::Nth { index: i, within: Some(w), .. } }
                        if *i == index && w == ".btn_inventory"
                ))
                .expect("add-to-cart click present");
            assert!(read_at < click_at, "price {index} read after its click");
        }
    }

    #[test]
    fn glitch_checkout_expects_the_fixed_tax() {
        let scenario = by_name("glitch-checkout", BASE).unwrap();
        let has_taxed_total = scenario.steps.iter().any(|s| {
            matches!(
                &s.expect,
                Some(Expectation::TotalEquals { surcharge, .. }) if *surcharge == SALES_TAX
            )
        });
        assert!(has_taxed_total);
    }
}
