use super::*;

fn photo(url_max: Option<&str>, url_1440: Option<&str>, url: Option<&str>) -> RawPhoto {
    RawPhoto {
        url_max: url_max.map(str::to_owned),
        url_1440: url_1440.map(str::to_owned),
        url: url.map(str::to_owned),
    }
}

// =============================================================================
// normalize_photos
// =============================================================================

#[test]
fn photos_array_passes_through_when_complete() {
    let photos = [photo(Some("max.jpg"), Some("1440.jpg"), None)];
    let result = normalize_photos(Some(&photos), None);
    assert_eq!(result, vec![HotelPhoto { url_max: "max.jpg".into(), url_1440: "1440.jpg".into() }]);
}

#[test]
fn missing_sizes_fall_back_to_plain_url() {
    let photos = [photo(None, None, Some("plain.jpg"))];
    let result = normalize_photos(Some(&photos), None);
    assert_eq!(result[0].url_max, "plain.jpg");
    assert_eq!(result[0].url_1440, "plain.jpg");
}

#[test]
fn max_photo_url_builds_single_entry_when_no_array() {
    let result = normalize_photos(None, Some("cover.jpg"));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].url_max, "cover.jpg");
    assert_eq!(result[0].url_1440, "cover.jpg");
}

#[test]
fn empty_array_falls_back_to_max_photo_url() {
    let result = normalize_photos(Some(&[]), Some("cover.jpg"));
    assert_eq!(result.len(), 1);
}

#[test]
fn nothing_available_yields_no_photos() {
    assert!(normalize_photos(None, None).is_empty());
    assert!(normalize_photos(Some(&[]), None).is_empty());
}

// =============================================================================
// upstream payload parsing
// =============================================================================

#[test]
fn destination_envelope_parses_subset_of_fields() {
    let json = r#"{"status": true, "message": "Success", "timestamp": 1,
        "data": [{"dest_id": "-553173", "city_name": "Lisbon", "country": "Portugal",
                  "search_type": "city", "nr_hotels": 1345}]}"#;
    let envelope: Envelope<DestinationHit> = serde_json::from_str(json).unwrap();
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.data[0].dest_id, "-553173");
    assert_eq!(envelope.data[0].city_name.as_deref(), Some("Lisbon"));
}

#[test]
fn destination_envelope_tolerates_missing_data() {
    let envelope: Envelope<DestinationHit> =
        serde_json::from_str(r#"{"status": false, "message": "nope"}"#).unwrap();
    assert!(envelope.data.is_empty());
}

#[test]
fn raw_hotel_parses_with_partial_fields() {
    let json = r#"{"hotel_id": 42, "hotel_name": "Hotel Azul",
                   "max_photo_url": "azul.jpg", "unrelated": {"x": 1}}"#;
    let raw: RawHotel = serde_json::from_str(json).unwrap();
    assert_eq!(raw.hotel_id, Some(42));
    assert_eq!(raw.hotel_name.as_deref(), Some("Hotel Azul"));
    assert!(raw.photos.is_none());
}

// =============================================================================
// error taxonomy
// =============================================================================

#[test]
fn no_destination_error_names_the_query() {
    let err = TravelError::NoDestination("Atlantis".into());
    assert!(err.to_string().contains("Atlantis"));
}

#[test]
fn upstream_error_carries_status() {
    let err = TravelError::Upstream { status: 429, body: String::new() };
    assert!(err.to_string().contains("429"));
}

// =============================================================================
// stay params
// =============================================================================

#[test]
fn stay_params_deserialize_from_query_shape() {
    let stay: StayParams =
        serde_json::from_str(r#"{"checkin": "2025-06-01", "adults": 3}"#).unwrap();
    assert_eq!(stay.checkin.as_deref(), Some("2025-06-01"));
    assert_eq!(stay.adults, Some(3));
    assert!(stay.checkout.is_none());
}
