mod booking_test;
mod config_test;
mod middleware_test;
mod mock_store_test;
mod router_test;
mod test_utils;
