//! Instruction-script templates.
//!
//! Pure string interpolation: parameters are inserted verbatim, in a fixed
//! action order, with no validation beyond what the dispatcher already did.
//! Interpreting dates, emails and the like is the automation engine's job.

use taskpilot_core::{FlightDetails, FoodDetails};

/// Render the Wolt food-order script. Ends by capturing the tracking URL
/// and navigating to it, which puts it last in the run history.
pub fn food_order(details: &FoodDetails) -> String {
    let FoodDetails {
        address,
        restaurant_name,
        item,
    } = details;

    format!(
        "\
1. Go to wolt.com
2. Click the location blip icon
3. Click Add new address
4. In the Street name and number input enter {address} and then press Enter
5. Click Continue
6. On the location selection click the Choose button for Other, the fourth option
7. In the Address details box enter {address} and then press Enter
8. Click on the Search in Wolt... search bar
9. Enter {restaurant_name} and then press Enter to search
10. DO NOT SCROLL YET: from the available options, identify the option in the list with the text {restaurant_name} and click it
11. Scroll through this page until you find {item} and then click on it
12. Click Add to order
13. Click View Order
14. Click Go to checkout
15. Find and click the Click to order button
16. Click Share tracking
17. Save the entire track.wolt.com URL visible on screen and then navigate to it
"
    )
}

/// Render the Lufthansa one-way booking script. Stops at the
/// continue-to-payment step; no payment is ever submitted.
pub fn flight_booking(details: &FlightDetails) -> String {
    let FlightDetails {
        to_city,
        from_city,
        date,
        first_name,
        last_name,
        date_of_birth,
        email,
        phone_number,
    } = details;

    format!(
        "\
1. Go to www.lufthansa.com/cz/en/homepage
2. Click the Round trip dropdown and select One-way instead
3. Click the text input below From; if it is pre-filled with Prague press the clear x button, then enter {from_city} and press Enter
4. Click the To text input, type {to_city} and press Enter
5. Click on the Departure button
6. Click on the date {date}, scroll down and then click on the Continue button
7. Click on the Search Flights button
8. Scroll down, select the first available flight and click its Economy option button
9. Click on the Select button of Economy Light, you may need to scroll down
10. Click on the Enter Passenger Details button
11. Click on the Continue button on the passengers page
12. Click on the Economy select button
13. Scroll down and then click on the Economy Zero orange arrow button
14. Click on the Continue with selected flights button
15. Click on the Mr. option in the Title dropdown
16. Enter in the First name text input the name {first_name}
17. Enter in the Last name text input the name {last_name}
18. Enter in the Date of Birth text input exactly this: {date_of_birth}
19. Click on the Male gender button
20. Enter in the Email text input {email}, you may need to scroll down
21. In the Country calling code dropdown search for Canada and select it
22. Enter in the Phone text input {phone_number}
23. Click on the Confirm button
24. Scroll down until the Continue to payment button and click it, then stop
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_details() -> FoodDetails {
        FoodDetails {
            address: "1 Main St".to_string(),
            restaurant_name: "Pizza Place".to_string(),
            item: "Margherita".to_string(),
        }
    }

    fn flight_details() -> FlightDetails {
        FlightDetails {
            to_city: "Rome".to_string(),
            from_city: "Prague".to_string(),
            date: "2026-09-14".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: "10/12/1985".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+1 555 0100".to_string(),
        }
    }

    #[test]
    fn test_food_order_contains_all_fields_verbatim() {
        let script = food_order(&food_details());
        assert!(script.contains("1 Main St"));
        assert!(script.contains("Pizza Place"));
        assert!(script.contains("Margherita"));
        assert!(script.contains("track.wolt.com"));
    }

    #[test]
    fn test_food_order_action_ordering_is_stable() {
        let script = food_order(&food_details());
        let search = script.find("Search in Wolt").unwrap();
        let pick_item = script.find("Margherita").unwrap();
        let tracking = script.find("track.wolt.com").unwrap();
        assert!(search < pick_item);
        assert!(pick_item < tracking);
    }

    #[test]
    fn test_food_order_is_deterministic() {
        let details = food_details();
        assert_eq!(food_order(&details), food_order(&details));
    }

    #[test]
    fn test_flight_booking_contains_all_eight_fields_verbatim() {
        let script = flight_booking(&flight_details());
        for field in [
            "Rome",
            "Prague",
            "2026-09-14",
            "Ada",
            "Lovelace",
            "10/12/1985",
            "ada@example.com",
            "+1 555 0100",
        ] {
            assert!(script.contains(field), "missing {field} in script");
        }
    }

    #[test]
    fn test_flight_booking_ends_before_payment() {
        let script = flight_booking(&flight_details());
        assert!(script.trim_end().ends_with("Continue to payment button and click it, then stop"));
    }

    #[test]
    fn test_flight_booking_is_deterministic() {
        let details = flight_details();
        assert_eq!(flight_booking(&details), flight_booking(&details));
    }
}
