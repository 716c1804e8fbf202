mod test_screen_share_round_trip;
