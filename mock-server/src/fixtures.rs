//! Canned profile, workout and ride data served by the stub.

use serde_json::{json, Value};

pub const DEMO_USERNAME: &str = "rider@example.com";
pub const DEMO_PASSWORD: &str = "correct-horse";
pub const DEMO_USER_ID: &str = "9f1c2a7e4b3d4c0e8a6b5f2d1e0c9b8a";
pub const FRIEND_USER_ID: &str = "3c5e7a9b1d2f4e6a8c0b2d4f6a8c0e2b";
pub const RIDE_ID: &str = "b6a3c8e2f1d04a5b9c7e8f0a1b2c3d4e";

/// Ids of the demo user's workouts, newest first.
pub const WORKOUT_IDS: [&str; 3] = [
    "0a1b2c3d4e5f60718293a4b5c6d7e8f9",
    "1b2c3d4e5f60718293a4b5c6d7e8f90a",
    "2c3d4e5f60718293a4b5c6d7e8f90a1b",
];

pub fn me(user_id: &str) -> Value {
    json!({
        "id": user_id,
        "username": "PowerZoneRider",
        "email": DEMO_USERNAME,
        "first_name": "Demo",
        "last_name": "Rider",
        "location": "Brooklyn, NY",
        "image_url": "https://example.invalid/avatar.png",
        "total_workouts": WORKOUT_IDS.len(),
        "total_followers": 1,
        "total_following": 1,
        "is_profile_private": false,
        "created_at": 1_577_836_800,
        "cycling_ftp": 212
    })
}

pub fn user(user_id: &str) -> Option<Value> {
    match user_id {
        DEMO_USER_ID => Some(me(user_id)),
        FRIEND_USER_ID => Some(json!({
            "id": FRIEND_USER_ID,
            "username": "HillClimber",
            "location": "Denver, CO",
            "image_url": "https://example.invalid/climber.png",
            "total_workouts": 812,
            "total_followers": 1,
            "total_following": 1,
            "is_profile_private": false,
            "created_at": 1_546_300_800
        })),
        _ => None,
    }
}

/// The other side of a follow relation for `user_id`.
pub fn related_users(user_id: &str) -> Vec<Value> {
    let other = if user_id == DEMO_USER_ID {
        FRIEND_USER_ID
    } else {
        DEMO_USER_ID
    };
    user(other)
        .map(|u| {
            vec![json!({
                "id": u["id"],
                "username": u["username"],
                "location": u["location"],
                "image_url": u["image_url"],
                "is_profile_private": false
            })]
        })
        .unwrap_or_default()
}

pub fn ride() -> Value {
    json!({
        "id": RIDE_ID,
        "title": "30 min Power Zone Endurance Ride",
        "description": "Build your aerobic base in zones 2 and 3.",
        "fitness_discipline": "cycling",
        "instructor_id": "c406f36aa2a44a5f8e0db6a4e7b2c8e1",
        "duration": 1800,
        "difficulty_estimate": 6.42,
        "image_url": "https://example.invalid/ride.png",
        "original_air_time": 1_609_459_200,
        "total_workouts": 48_213
    })
}

pub fn ride_details() -> Value {
    json!({
        "ride": ride(),
        "playlist": {
            "songs": [
                {"title": "Midnight City", "artists": [{"artist_name": "M83"}]}
            ]
        },
        "segments": {
            "segment_list": [
                {"name": "Warmup", "start_time_offset": 0, "length": 300},
                {"name": "Main", "start_time_offset": 300, "length": 1320},
                {"name": "Cool Down", "start_time_offset": 1620, "length": 180}
            ]
        },
        "averages": {"average_avg_output": 154}
    })
}

pub fn workout(workout_id: &str, user_id: &str, with_ride: bool, with_user: bool) -> Value {
    let index = WORKOUT_IDS
        .iter()
        .position(|id| *id == workout_id)
        .unwrap_or(0) as i64;
    let mut workout = json!({
        "id": workout_id,
        "status": "COMPLETE",
        "fitness_discipline": "cycling",
        "device_type": "home_bike_v1",
        "user_id": user_id,
        "created_at": 1_612_137_600 - index * 86_400,
        "start_time": 1_612_137_660 - index * 86_400,
        "end_time": 1_612_139_460 - index * 86_400,
        "total_work": 301_554.2 - index as f64 * 1_000.0,
        "is_total_work_personal_record": index == 0
    });
    if with_ride {
        workout["ride"] = ride();
    }
    if with_user {
        if let Some(user) = user(user_id) {
            workout["user"] = user;
        }
    }
    workout
}

pub fn performance_graph(every_n: u32) -> Value {
    let every_n = every_n.max(1);
    let duration = 1800u32;
    let seconds: Vec<u32> = (0..duration).step_by(every_n as usize).collect();
    let output: Vec<f64> = seconds
        .iter()
        .map(|s| 120.0 + f64::from(s % 300) / 10.0)
        .collect();
    let max_output = output.iter().copied().fold(0.0_f64, f64::max);
    json!({
        "duration": duration,
        "is_class_plan_shown": true,
        "seconds_since_pedaling_start": seconds,
        "average_summaries": [
            {
                "display_name": "Avg Output",
                "display_unit": "watts",
                "value": 135,
                "slug": "avg_output"
            }
        ],
        "summaries": [
            {
                "display_name": "Total Output",
                "display_unit": "kj",
                "value": 301,
                "slug": "total_output"
            }
        ],
        "metrics": [
            {
                "display_name": "Output",
                "display_unit": "watts",
                "slug": "output",
                "max_value": max_output,
                "average_value": 135,
                "values": output
            }
        ]
    })
}

pub fn error_body(status: u16, error_code: u32, message: &str) -> Value {
    json!({
        "status": status,
        "error_code": error_code,
        "message": message
    })
}
