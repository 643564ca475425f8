//! Embedded web pages.
//!
//! Both pages are self-contained (inline style and script) so the device
//! never serves more than one resource per mode.

pub(super) const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Lamp</title>
<style>
body{font-family:sans-serif;max-width:26em;margin:2em auto;padding:0 1em}
label{display:block;margin-top:1.2em}
input[type=range]{width:100%}
button{margin:1.2em .4em 0 0;padding:.5em 1.4em}
#id{color:#777;font-size:.85em}
</style>
</head>
<body>
<h2>Lamp dimmer</h2>
<p id="id">lamp: ?</p>
<label>Brightness
<input type="range" id="brightness" min="0" max="23" value="0"></label>
<label>Warm &#8594; white
<input type="range" id="hue" min="0" max="23" value="0"></label>
<div>
<button onclick="command('ON')">On</button>
<button onclick="command('OFF')">Off</button>
<button onclick="command('RECONFIG')">Pair</button>
</div>
<script>
let hold=0;
function send(path,body){fetch(path,{method:'POST',body:JSON.stringify(body)});}
function command(c){send('/command',{command:c});}
for(const axis of['brightness','hue']){
  const el=document.getElementById(axis);
  el.oninput=()=>{hold=Date.now()+1500;};
  el.onchange=()=>{send('/slider',{slider:axis,value:+el.value});};
}
setInterval(async()=>{
  if(Date.now()<hold)return;
  const r=await fetch('/values');if(!r.ok)return;
  const v=await r.json();
  document.getElementById('id').textContent='lamp: '+v.id;
  document.getElementById('brightness').value=v.brightness;
  document.getElementById('hue').value=v.hue;
},1000);
</script>
</body>
</html>
"#;

pub(super) const SETUP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Lamp setup</title>
<style>
body{font-family:sans-serif;max-width:26em;margin:2em auto;padding:0 1em}
input{display:block;width:100%;margin:.4em 0 1em;padding:.4em}
button{padding:.5em 1.4em}
</style>
</head>
<body>
<h2>WiFi setup</h2>
<p>Enter the network this dimmer should join. The device restarts after
saving.</p>
<label>Network name (SSID)<input id="ssid" maxlength="32"></label>
<label>Password<input id="password" type="password" maxlength="64"></label>
<button onclick="save()">Save &amp; restart</button>
<p id="state"></p>
<script>
async function save(){
  const body={ssid:document.getElementById('ssid').value,
              password:document.getElementById('password').value};
  document.getElementById('state').textContent='Saving...';
  try{
    await fetch('/setup',{method:'POST',body:JSON.stringify(body)});
    document.getElementById('state').textContent='Saved. The device is restarting.';
  }catch(e){
    document.getElementById('state').textContent='Saved. The device is restarting.';
  }
}
</script>
</body>
</html>
"#;
