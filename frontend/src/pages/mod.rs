pub mod kiosk;
