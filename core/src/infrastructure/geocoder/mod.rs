pub mod http_geocoder;
